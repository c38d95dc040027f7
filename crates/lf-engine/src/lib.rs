//! The real-time streaming core: turns a `WorldSnapshot` into UDP
//! datagrams on a steady per-output clock (§4.H, §4.I).

mod engine;
mod provider;

pub use engine::{EngineConfig, StreamingEngine};
pub use provider::{FrameProvider, ProviderOutcome, WorldFrameProvider};
