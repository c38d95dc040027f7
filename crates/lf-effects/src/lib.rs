//! Deterministic, nested effect chain evaluation (§3, §4.D–§4.F).
//!
//! Given a `Frame` and a chain of [`chain::ChainItem`]s, [`chain::apply_chain`]
//! produces the transformed output frame for one tick. Evaluation is pure:
//! no wall-clock reads, no I/O, no hidden state beyond what the caller
//! threads through [`chain::EffectContext`].

pub mod chain;
pub mod curve;
pub mod library;
pub mod modulator;
pub mod params;
pub mod registry;

pub use chain::{apply_chain, chain_depth, validate_chain_depth, EffectContext, EffectInstance, GroupNode, ChainItem};
pub use curve::Curve;
pub use modulator::{ModulatorConfig, ModulatorKind, ScalarParam};
pub use params::{BlockedRegion, EffectParams, NormalizedRect, ParamPoint2, ZoneRerouteMode};
pub use registry::{EffectRegistry, EffectTransformer};
