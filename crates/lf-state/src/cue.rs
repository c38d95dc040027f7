//! Cue chains: the content and routing assigned to one grid cell (§3,
//! §4.H).
//!
//! A cue is an ordered list of preset items, each carrying its own
//! optional per-item effect chain (§3: "the sequence of presets (with
//! their own per-item effects) bound to a grid cell"). The frame provider
//! renders each item, applies its per-item chain, concatenates the
//! results in declaration order (§9 resolved: concatenation, not
//! last-wins), then applies this cue's own cell-level `effect_chain` on
//! top of the composed frame — after preset composition, before the
//! projector-level effect pass (§4.H). Which cell is actually live is a
//! single world-wide fact, not a per-cue flag; see `PlaybackState` in
//! `crate::snapshot`.

use std::sync::Arc;

use lf_core::{CellCoord, OutputId};
use lf_effects::ChainItem;

use crate::preset::Preset;

/// One preset bound into a cue, with the effect chain applied to its own
/// rendered frame before it's concatenated with its siblings (§3, §4.H).
pub struct CuePresetItem {
    pub preset: Arc<dyn Preset>,
    pub effect_chain: Vec<ChainItem>,
}

impl CuePresetItem {
    pub fn new(preset: Arc<dyn Preset>) -> Self {
        Self {
            preset,
            effect_chain: Vec::new(),
        }
    }
}

pub struct CueChain {
    pub cell: CellCoord,
    pub enabled: bool,
    pub items: Vec<CuePresetItem>,
    /// Cell-level chain (§3 `effect-chains[(col,row)]`), applied once to
    /// the composed frame after every item's own chain and concatenation,
    /// before the projector-effects pass (§4.H).
    pub effect_chain: Vec<ChainItem>,
    pub default_targets: Vec<OutputId>,
}

impl CueChain {
    pub fn new(cell: CellCoord) -> Self {
        Self {
            cell,
            enabled: true,
            items: Vec::new(),
            effect_chain: Vec::new(),
            default_targets: Vec::new(),
        }
    }
}
