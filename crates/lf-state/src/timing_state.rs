//! World-level tempo state (§3.1, §4.F).
//!
//! Wraps the beat clock the frame provider advances every tick with the
//! bounded tap-tempo helper. `tap` is only ever called by the external
//! input dispatcher that turns a UI tap gesture into a new snapshot — the
//! rendering core itself never calls it (§3.1).

use lf_core::{BeatClock, TapTempo, TimingContext};

#[derive(Debug, Clone)]
pub struct TimingState {
    pub bpm: f64,
    pub clock: BeatClock,
    tap_tempo: TapTempo,
}

impl TimingState {
    pub fn new(bpm: f64) -> Self {
        Self {
            bpm,
            clock: BeatClock::default(),
            tap_tempo: TapTempo::new(),
        }
    }

    /// Advances the beat clock by `delta_ms`. Call exactly once per tick.
    pub fn advance(&mut self, delta_ms: f64) {
        self.clock.advance(delta_ms, self.bpm);
    }

    pub fn timing_context(&self) -> TimingContext {
        self.clock.timing_context(self.bpm)
    }

    /// Registers a tap and, once enough taps have landed, adopts the
    /// derived BPM as the new tempo.
    pub fn tap(&mut self, now_ms: f64) -> Option<f64> {
        let bpm = self.tap_tempo.tap(now_ms)?;
        self.bpm = bpm;
        Some(bpm)
    }

    pub fn reset_taps(&mut self) {
        self.tap_tempo.reset();
    }
}
