//! Physical and virtual projector declarations (§3, §4.I).

use std::net::SocketAddr;

use lf_core::{ProjectorId, VirtualProjectorId};
use lf_effects::ChainItem;

/// A physical projector reachable over the network by IDN-Hello /
/// IDN-Stream (§4.I). One `StreamingEngine` owns one of these for its
/// lifetime. `effect_chain` is the projector-level pass applied after
/// every routed cue's output has been composed for the tick (§4.H).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Projector {
    pub id: ProjectorId,
    pub name: String,
    pub enabled: bool,
    pub endpoint: SocketAddr,
    pub service_id: u8,
    pub channel_id: u8,
    pub effect_chain: Vec<ChainItem>,
}

impl Projector {
    pub fn new(id: ProjectorId, name: impl Into<String>, endpoint: SocketAddr) -> Self {
        Self {
            id,
            name: name.into(),
            enabled: true,
            endpoint,
            service_id: 0,
            channel_id: 0,
            effect_chain: Vec::new(),
        }
    }
}

/// A logical projector output with its own network endpoint, routed to
/// independently of any physical projector (§4.G: cues may target a
/// virtual output, e.g. a simulator or a secondary feed).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VirtualProjector {
    pub id: VirtualProjectorId,
    pub name: String,
    pub enabled: bool,
    pub endpoint: SocketAddr,
    pub service_id: u8,
    pub channel_id: u8,
    pub effect_chain: Vec<ChainItem>,
}

impl VirtualProjector {
    pub fn new(id: VirtualProjectorId, name: impl Into<String>, endpoint: SocketAddr) -> Self {
        Self {
            id,
            name: name.into(),
            enabled: true,
            endpoint,
            service_id: 0,
            channel_id: 0,
            effect_chain: Vec::new(),
        }
    }
}
