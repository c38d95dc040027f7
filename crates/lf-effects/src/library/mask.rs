//! blocked-regions: blanks points inside one or more dead zones rather
//! than dropping them, so downstream point ordering and count are
//! preserved (§4.D).

use lf_core::{normalize, Frame};

use crate::chain::EffectContext;
use crate::params::EffectParams;

pub fn blocked_regions(frame: &Frame, params: &EffectParams, _ctx: &EffectContext) -> Frame {
    let EffectParams::BlockedRegions { regions } = params else {
        return frame.clone();
    };
    if regions.is_empty() {
        return frame.clone();
    }

    frame
        .points
        .iter()
        .map(|p| {
            let (x, y) = (normalize(p.x), normalize(p.y));
            if regions.iter().any(|region| region.contains(x, y)) {
                p.blank()
            } else {
                *p
            }
        })
        .collect()
}
