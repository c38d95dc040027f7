//! World state: the fully-resolved snapshot an engine renders from (§3).

mod cue;
mod preset;
mod projector;
mod snapshot;
mod timing_state;

pub use cue::{CueChain, CuePresetItem};
pub use preset::Preset;
pub use projector::{Projector, VirtualProjector};
pub use snapshot::{PlaybackState, WorldSnapshot};
pub use timing_state::TimingState;
