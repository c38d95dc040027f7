//! Error types shared by the laser streaming core crates.

use thiserror::Error;

/// Core error type for construction-time and validation failures.
///
/// Per-frame recoverable conditions (§7 propagation policy) never surface
/// as `LfError` — they are represented as `ProviderOutcome::Skipped` in
/// `lf-engine` instead.
#[derive(Error, Debug)]
pub enum LfError {
    #[error("invalid output config: color bit depth and xy bit depth must each be 8 or 16, got color={color_bits}, xy={xy_bits}")]
    InvalidConfig { color_bits: u8, xy_bits: u8 },

    #[error("invalid fps: {0} (must be > 0)")]
    InvalidFps(u32),

    #[error("malformed curve: {0}")]
    MalformedCurve(String),

    #[error("effect chain nested deeper than the configured maximum of {max} (found depth {found})")]
    ChainTooDeep { max: usize, found: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("socket error: {0}")]
    SocketFatal(String),

    #[error("shutdown timed out waiting for streaming thread to join")]
    ShutdownTimeout,
}

/// Result type alias used throughout the core crates.
pub type LfResult<T> = Result<T, LfError>;
