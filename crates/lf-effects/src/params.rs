//! Effect parameter shapes (§3 EffectInstance, §4.D).
//!
//! The source models `params` as a dynamic map; per the redesign notes
//! this core instead gives every effect kind a fixed-field struct, with
//! `EffectParams` as the tagged union the chain engine dispatches on.
//! `EffectParams::Unknown` represents a chain entry whose `effect_id`
//! this build's registry does not recognize (version skew with the
//! external authoring tool) — handled as identity + one-shot warning
//! rather than a construction error, per §4.E.

use lf_core::ZoneGroupId;

use crate::curve::Curve;
use crate::modulator::ScalarParam;

/// A 2D point whose coordinates may each be modulated independently.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParamPoint2 {
    pub x: ScalarParam,
    pub y: ScalarParam,
}

impl ParamPoint2 {
    pub fn static_point(x: f64, y: f64) -> Self {
        Self {
            x: ScalarParam::static_value(x),
            y: ScalarParam::static_value(y),
        }
    }
}

/// A blocked region in normalized `[-1,1]` space (§4.D blocked-regions).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum BlockedRegion {
    Rect {
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
    },
    Circle { cx: f64, cy: f64, radius: f64 },
}

impl BlockedRegion {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        match self {
            BlockedRegion::Rect {
                min_x,
                min_y,
                max_x,
                max_y,
            } => x >= *min_x && x <= *max_x && y >= *min_y && y <= *max_y,
            BlockedRegion::Circle { cx, cy, radius } => {
                let dx = x - cx;
                let dy = y - cy;
                (dx * dx + dy * dy).sqrt() <= *radius
            }
        }
    }
}

/// A sub-rectangle of normalized `[-1,1]` space (§4.D viewport).
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NormalizedRect {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

/// `zone-reroute`'s combination mode (§4.G).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ZoneRerouteMode {
    Replace,
    Add,
    Filter,
}

/// Fixed-field parameter payload for one effect kind (§4.D, §4.D.1, §4.G).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum EffectParams {
    RgbCurves {
        r: Curve,
        g: Curve,
        b: Curve,
    },
    CornerPin {
        tl: ParamPoint2,
        tr: ParamPoint2,
        bl: ParamPoint2,
        br: ParamPoint2,
    },
    Scale {
        sx: ScalarParam,
        sy: ScalarParam,
    },
    Offset {
        tx: ScalarParam,
        ty: ScalarParam,
    },
    Rotate {
        theta: ScalarParam,
    },
    BlockedRegions {
        regions: Vec<BlockedRegion>,
    },
    Viewport {
        rect: NormalizedRect,
    },
    HueShift {
        degrees: ScalarParam,
    },
    ZoneReroute {
        mode: ZoneRerouteMode,
        target_zone_groups: Vec<ZoneGroupId>,
    },
    ZoneBroadcast,
    ZoneMirror {
        source_group: ZoneGroupId,
        include_original: bool,
    },
    /// A chain entry referencing an effect id this registry build does
    /// not know about.
    Unknown {
        effect_id: String,
    },
}

impl EffectParams {
    /// The canonical stable id used for registry lookup and logging.
    pub fn effect_id(&self) -> &str {
        match self {
            EffectParams::RgbCurves { .. } => "rgb-curves",
            EffectParams::CornerPin { .. } => "corner-pin",
            EffectParams::Scale { .. } => "scale",
            EffectParams::Offset { .. } => "offset",
            EffectParams::Rotate { .. } => "rotate",
            EffectParams::BlockedRegions { .. } => "blocked-regions",
            EffectParams::Viewport { .. } => "viewport",
            EffectParams::HueShift { .. } => "hue-shift",
            EffectParams::ZoneReroute { .. } => "zone-reroute",
            EffectParams::ZoneBroadcast => "zone-broadcast",
            EffectParams::ZoneMirror { .. } => "zone-mirror",
            EffectParams::Unknown { effect_id } => effect_id,
        }
    }

    /// True for the three routing effects the routing resolver (lf-routing)
    /// walks independently of the frame-transform chain (§4.G).
    pub fn is_zone_rewriting(&self) -> bool {
        matches!(
            self,
            EffectParams::ZoneReroute { .. }
                | EffectParams::ZoneBroadcast
                | EffectParams::ZoneMirror { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effect_id_matches_canonical_names() {
        assert_eq!(EffectParams::ZoneBroadcast.effect_id(), "zone-broadcast");
        assert_eq!(
            EffectParams::Unknown {
                effect_id: "future-fx".into()
            }
            .effect_id(),
            "future-fx"
        );
    }

    #[test]
    fn zone_effects_are_flagged_zone_rewriting() {
        assert!(EffectParams::ZoneBroadcast.is_zone_rewriting());
        assert!(!EffectParams::Rotate {
            theta: ScalarParam::static_value(0.0)
        }
        .is_zone_rewriting());
    }

    #[test]
    fn blocked_region_rect_contains() {
        let region = BlockedRegion::Rect {
            min_x: -0.5,
            min_y: -0.5,
            max_x: 0.5,
            max_y: 0.5,
        };
        assert!(region.contains(0.0, 0.0));
        assert!(!region.contains(0.9, 0.0));
    }

    #[test]
    fn blocked_region_circle_contains() {
        let region = BlockedRegion::Circle {
            cx: 0.0,
            cy: 0.0,
            radius: 1.0,
        };
        assert!(region.contains(0.5, 0.5));
        assert!(!region.contains(2.0, 0.0));
    }
}
