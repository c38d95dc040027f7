//! Zone group membership (§4.G).
//!
//! A zone group is just a named set of outputs; the resolver treats
//! membership as opaque data handed to it by the caller (`lf-state` owns
//! the authoritative map), so routing never needs to know how a zone
//! group was authored.

use lf_core::{OutputId, ZoneGroupId};

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ZoneGroup {
    pub id: ZoneGroupId,
    pub name: String,
    pub members: Vec<OutputId>,
    /// The paired zone group `zone-mirror` adds when this group is
    /// targeted (§4.G), e.g. a `:left` group's `mirror_of` points at
    /// `:right`. `None` if this group has no declared counterpart.
    pub mirror_of: Option<ZoneGroupId>,
}

impl ZoneGroup {
    pub fn new(id: ZoneGroupId, name: impl Into<String>, members: Vec<OutputId>) -> Self {
        Self {
            id,
            name: name.into(),
            members,
            mirror_of: None,
        }
    }

    pub fn with_mirror_of(mut self, mirror: ZoneGroupId) -> Self {
        self.mirror_of = Some(mirror);
        self
    }
}
