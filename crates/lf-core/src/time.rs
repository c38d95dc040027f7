//! Beat/time helpers shared by the effect chain and modulator evaluator.
//!
//! The frame provider advances `accumulated_beats` once per frame and
//! eases `phase_offset` toward `phase_offset_target` (used by tap-tempo
//! resync); both are threaded through as a `TimingContext` rather than
//! recomputed inside every effect.

use serde::{Deserialize, Serialize};

/// Per-frame-call context carrying the beat clock. Constructed once by the
/// frame provider and passed by value into the effect chain and modulator
/// evaluator so neither ever touches wall-clock time directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingContext {
    pub bpm: f64,
    pub accumulated_beats: f64,
    pub phase_offset: f64,
}

impl TimingContext {
    pub fn new(bpm: f64, accumulated_beats: f64, phase_offset: f64) -> Self {
        Self {
            bpm,
            accumulated_beats,
            phase_offset,
        }
    }
}

/// Per-frame easing rate toward a tap-tempo resync target (§4.F).
pub const PHASE_OFFSET_EASE_FACTOR: f64 = 0.1;

/// Converts elapsed milliseconds to elapsed beats at a given tempo.
#[inline]
pub fn ms_to_beats(delta_ms: f64, bpm: f64) -> f64 {
    delta_ms * bpm / 60_000.0
}

/// Eases `current` toward `target` by the fixed per-frame factor (§4.F:
/// "phase_offset asymptoting toward phase_offset_target").
#[inline]
pub fn ease_phase_offset(current: f64, target: f64) -> f64 {
    current + (target - current) * PHASE_OFFSET_EASE_FACTOR
}

/// Running beat/phase state advanced once per frame by the frame provider.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BeatClock {
    pub accumulated_beats: f64,
    pub phase_offset: f64,
    pub phase_offset_target: f64,
}

impl BeatClock {
    /// Advances the clock by `delta_ms` at the given `bpm`, easing
    /// `phase_offset` toward its target. Call exactly once per rendered
    /// frame (never per effect).
    pub fn advance(&mut self, delta_ms: f64, bpm: f64) {
        self.accumulated_beats += ms_to_beats(delta_ms, bpm);
        self.phase_offset = ease_phase_offset(self.phase_offset, self.phase_offset_target);
    }

    pub fn timing_context(&self, bpm: f64) -> TimingContext {
        TimingContext::new(bpm, self.accumulated_beats, self.phase_offset)
    }
}

/// Bounded tap-tempo helper. A pure convenience the external event
/// dispatcher may call before publishing a new snapshot; the core itself
/// never calls this (§3.1).
#[derive(Debug, Clone, Default)]
pub struct TapTempo {
    taps_ms: Vec<f64>,
}

/// Tap history is bounded so a stale session of taps doesn't skew the
/// median forever.
const MAX_TAPS: usize = 8;
const MIN_BPM: f64 = 20.0;
const MAX_BPM: f64 = 400.0;

impl TapTempo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tap at `now_ms` and returns the derived BPM, if enough
    /// taps have been recorded to compute one.
    pub fn tap(&mut self, now_ms: f64) -> Option<f64> {
        self.taps_ms.push(now_ms);
        if self.taps_ms.len() > MAX_TAPS {
            self.taps_ms.remove(0);
        }
        self.derive_bpm()
    }

    pub fn reset(&mut self) {
        self.taps_ms.clear();
    }

    fn derive_bpm(&self) -> Option<f64> {
        if self.taps_ms.len() < 2 {
            return None;
        }
        let mut intervals: Vec<f64> = self
            .taps_ms
            .windows(2)
            .map(|w| w[1] - w[0])
            .filter(|d| *d > 0.0)
            .collect();
        if intervals.is_empty() {
            return None;
        }
        intervals.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let mid = intervals.len() / 2;
        let median_ms = if intervals.len() % 2 == 0 {
            (intervals[mid - 1] + intervals[mid]) / 2.0
        } else {
            intervals[mid]
        };
        let bpm = 60_000.0 / median_ms;
        Some(bpm.clamp(MIN_BPM, MAX_BPM))
    }
}
