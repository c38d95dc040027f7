//! The world snapshot (§3): the single, fully-resolved description of
//! everything the engines need to render and stream one tick.
//!
//! Built and published wholesale by an external collaborator (the
//! authoring/editor layer); this core only ever reads one immutable
//! snapshot at a time and never mutates it in place, matching the
//! redesign notes' atomic-pointer-swap model (the `ArcSwap` itself lives
//! in `lf-engine`, which is what actually publishes and reads snapshots
//! across threads).

use std::collections::HashMap;

use lf_core::{
    CellCoord, LfError, LfResult, OutputConfig, OutputId, ProjectorId, VirtualProjectorId,
    ZoneGroupId, ZONE_GROUP_ALL,
};
use lf_effects::validate_chain_depth;
use lf_routing::ZoneGroup;

use crate::cue::CueChain;
use crate::projector::{Projector, VirtualProjector};
use crate::timing_state::TimingState;

/// Whether there is a currently live cell, and since when (§3). This is a
/// single, world-wide fact — there is at most one active cell at a time,
/// never one per cue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaybackState {
    Stopped,
    Playing {
        active_cell: CellCoord,
        trigger_time_ms: f64,
    },
}

pub struct WorldSnapshot {
    pub output_config: OutputConfig,
    pub projectors: HashMap<ProjectorId, Projector>,
    pub virtual_projectors: HashMap<VirtualProjectorId, VirtualProjector>,
    pub zone_groups: HashMap<ZoneGroupId, ZoneGroup>,
    pub cues: Vec<CueChain>,
    pub timing: TimingState,
    pub playback: PlaybackState,
}

impl WorldSnapshot {
    pub fn new(output_config: OutputConfig, bpm: f64) -> Self {
        Self {
            output_config,
            projectors: HashMap::new(),
            virtual_projectors: HashMap::new(),
            zone_groups: HashMap::new(),
            cues: Vec::new(),
            timing: TimingState::new(bpm),
            playback: PlaybackState::Stopped,
        }
    }

    /// The cue bound to the currently active cell, if any (§4.H).
    pub fn active_cue(&self) -> Option<&CueChain> {
        let PlaybackState::Playing { active_cell, .. } = self.playback else {
            return None;
        };
        self.cues.iter().find(|cue| cue.cell == active_cell)
    }

    pub fn all_outputs(&self) -> Vec<OutputId> {
        let mut outputs: Vec<OutputId> = self.projectors.keys().copied().map(OutputId::Projector).collect();
        outputs.extend(self.virtual_projectors.keys().copied().map(OutputId::Virtual));
        outputs
    }

    fn declares_output(&self, output: &OutputId) -> bool {
        match output {
            OutputId::Projector(id) => self.projectors.contains_key(id),
            OutputId::Virtual(id) => self.virtual_projectors.contains_key(id),
        }
    }

    /// Checks every invariant a snapshot must uphold before an engine is
    /// allowed to render from it (§3):
    ///
    /// 1. every zone group's members reference a declared output;
    /// 2. the reserved universal zone group id is never redeclared;
    /// 3. every cue's effect chain (cell-level and per-item) respects the
    ///    maximum nesting depth;
    /// 4. every cue's default targets reference a declared output.
    ///
    /// §3's invariant 4 ("playing ⇒ active_cell ≠ None ⇒ cue.items ≠ ∅")
    /// is deliberately not checked here — the spec says a violation
    /// should make the provider yield no frame rather than crash, so it's
    /// handled at render time in `WorldFrameProvider` (`lf-engine`), not
    /// rejected at construction time.
    pub fn validate(&self) -> LfResult<()> {
        if self.zone_groups.contains_key(&ZONE_GROUP_ALL) {
            return Err(LfError::MalformedCurve(
                "zone group id 0 is reserved for the implicit universal group".into(),
            ));
        }

        for group in self.zone_groups.values() {
            for member in &group.members {
                if !self.declares_output(member) {
                    return Err(LfError::MalformedCurve(format!(
                        "zone group '{}' references an undeclared output",
                        group.name
                    )));
                }
            }
        }

        for cue in &self.cues {
            validate_chain_depth(&cue.effect_chain)?;
            for item in &cue.items {
                validate_chain_depth(&item.effect_chain)?;
            }
            for target in &cue.default_targets {
                if !self.declares_output(target) {
                    return Err(LfError::MalformedCurve(format!(
                        "cue at ({}, {}) targets an undeclared output",
                        cue.cell.col, cue.cell.row
                    )));
                }
            }
        }

        Ok(())
    }
}
