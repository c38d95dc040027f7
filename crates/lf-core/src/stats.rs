//! Per-engine runtime statistics (§3.1, §4.I).
//!
//! Each `StreamingEngine` publishes one of these after every frame so a
//! supervisor or external monitor can observe throughput and the most
//! recent failure without polling the socket or thread directly.

#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct EngineStats {
    pub frames_sent: u64,
    pub last_frame_time_ms: f64,
    pub actual_fps: f64,
    pub last_error: Option<String>,
    /// Set once the engine has fallen behind its pacing target or hit a
    /// recoverable send failure; cleared on the next successful on-time
    /// frame.
    pub degraded: bool,
}

impl EngineStats {
    pub fn record_success(&mut self, frame_time_ms: f64, actual_fps: f64) {
        self.frames_sent += 1;
        self.last_frame_time_ms = frame_time_ms;
        self.actual_fps = actual_fps;
        self.degraded = false;
    }

    pub fn record_degraded(&mut self, frame_time_ms: f64, reason: impl Into<String>) {
        self.last_frame_time_ms = frame_time_ms;
        self.last_error = Some(reason.into());
        self.degraded = true;
    }
}
