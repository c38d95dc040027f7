//! Stable domain IDs.
//!
//! Every entity that is referenced across snapshot boundaries (projector,
//! zone group, preset, effect instance, group, cue cell) carries a stable
//! ID rather than being identified by position, so that a new `WorldSnapshot`
//! can be diffed against the previous one without invalidating in-flight
//! references.

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub u64);

        impl $name {
            #[inline]
            pub fn new(id: u64) -> Self {
                Self(id)
            }

            #[inline]
            pub fn as_u64(self) -> u64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(ProjectorId, "Identifies a physical projector output.");
id_newtype!(
    VirtualProjectorId,
    "Identifies a virtual (logical) projector output."
);
id_newtype!(ZoneGroupId, "Identifies a routing zone group.");
id_newtype!(PresetId, "Identifies a library animation preset.");
id_newtype!(EffectInstanceId, "Identifies a single effect instance.");
id_newtype!(GroupId, "Identifies an effect-chain group node.");

/// The implicit universal zone group that every output belongs to.
pub const ZONE_GROUP_ALL: ZoneGroupId = ZoneGroupId(0);

/// A grid cell coordinate (column, row) identifying a cue slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellCoord {
    pub col: u32,
    pub row: u32,
}

impl CellCoord {
    pub fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }
}

/// Identifies an engine output, whether backed by a physical or virtual
/// projector. Routing and the frame provider operate in terms of this
/// unified identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputId {
    Projector(ProjectorId),
    Virtual(VirtualProjectorId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_roundtrip() {
        let id = ProjectorId::new(42);
        assert_eq!(id.as_u64(), 42);
        assert_eq!(format!("{id}"), "42");
    }

    #[test]
    fn ids_are_ordered_and_hashable() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(ProjectorId::new(1));
        set.insert(ProjectorId::new(2));
        assert!(set.contains(&ProjectorId::new(1)));
        assert!(ProjectorId::new(1) < ProjectorId::new(2));
    }

    #[test]
    fn cell_coord_equality() {
        assert_eq!(CellCoord::new(0, 0), CellCoord::new(0, 0));
        assert_ne!(CellCoord::new(0, 0), CellCoord::new(1, 0));
    }
}
