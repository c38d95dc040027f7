//! The preset extension point (§3, §4.H).
//!
//! Preset content itself — the actual point-cloud generation for a named
//! animation — is an external collaborator's concern; this core only
//! needs a stable contract to pull a frame from whatever backs a cue at a
//! given elapsed time.

use lf_core::Frame;

/// Something that can render itself as a `Frame` at a given elapsed time
/// since its cue was triggered. Implementors must be safe to share across
/// the engine threads that poll them every tick.
pub trait Preset: Send + Sync {
    fn get_frame(&self, elapsed_ms: f64) -> Frame;
}
