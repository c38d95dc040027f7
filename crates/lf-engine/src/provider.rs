//! Per-tick frame production (§4.H, §9).
//!
//! The source signals "nothing to send this tick" and "fatal, stop
//! streaming" by raising exceptions through the render call stack. Per
//! the redesign notes this core instead returns an explicit
//! `ProviderOutcome` sum type, so the engine's pacing loop branches on a
//! value rather than unwinding.

use std::sync::Arc;

use lf_core::{Frame, LfError, OutputId, TimingContext};
use lf_effects::{apply_chain, EffectContext, EffectRegistry};
use lf_routing::RoutingResolver;
use lf_state::WorldSnapshot;

/// The result of asking a `FrameProvider` for this tick's output.
pub enum ProviderOutcome {
    /// Send this frame.
    Frame(Frame),
    /// Nothing routes to this output this tick; the engine should send
    /// its configured keep-alive substitute (an empty frame, §4.A) rather
    /// than treat this as an error.
    Skipped,
    /// An unrecoverable condition; the engine should mark itself degraded
    /// and stop rather than retry next tick.
    Fatal(LfError),
}

/// Produces the frame a given output should render at `now_ms`, given the
/// current world snapshot and this tick's beat-clock state. `timing` is
/// computed once per tick by the caller (the streaming engine owns the
/// running clock, since the snapshot itself is immutable) and threaded
/// through unchanged to every effect this call evaluates.
pub trait FrameProvider: Send + Sync {
    fn next_frame(
        &self,
        world: &WorldSnapshot,
        output: OutputId,
        now_ms: f64,
        timing: TimingContext,
    ) -> ProviderOutcome;
}

/// The default frame provider: renders the single active cue's items
/// (§3 PlaybackState, §4.H), applying each item's own effect chain before
/// concatenating them, then the cue's cell-level chain, then routes the
/// result and applies the output's projector-level effect chain.
pub struct WorldFrameProvider {
    registry: Arc<EffectRegistry>,
}

impl WorldFrameProvider {
    pub fn new(registry: Arc<EffectRegistry>) -> Self {
        Self { registry }
    }
}

impl Default for WorldFrameProvider {
    fn default() -> Self {
        Self::new(Arc::new(EffectRegistry::builtin()))
    }
}

impl FrameProvider for WorldFrameProvider {
    fn next_frame(
        &self,
        world: &WorldSnapshot,
        output: OutputId,
        now_ms: f64,
        timing: TimingContext,
    ) -> ProviderOutcome {
        if !output_enabled(world, output) {
            return ProviderOutcome::Skipped;
        }

        let mut composed = Frame::empty();

        if let Some(cue) = world.active_cue() {
            if cue.enabled && !cue.items.is_empty() {
                let all_outputs = world.all_outputs();
                let resolver = RoutingResolver::new(&world.zone_groups, &all_outputs);
                let targets = resolver.resolve(&cue.default_targets, &cue.effect_chain);

                if targets.contains(&output) {
                    let trigger_time_ms = trigger_time_of(world);
                    let mut raw = Frame::empty();
                    for item in &cue.items {
                        let base = item.preset.get_frame(now_ms - trigger_time_ms);
                        let ctx = EffectContext::new(now_ms, trigger_time_ms, timing);
                        let processed = apply_chain(&base, &item.effect_chain, &ctx, &self.registry);
                        raw.extend(processed);
                    }
                    let ctx = EffectContext::new(now_ms, trigger_time_ms, timing);
                    composed = apply_chain(&raw, &cue.effect_chain, &ctx, &self.registry);
                }
            }
        }

        let ctx = EffectContext::new(now_ms, now_ms, timing);
        let chain = projector_chain(world, output);
        let final_frame = apply_chain(&composed, chain, &ctx, &self.registry);
        ProviderOutcome::Frame(final_frame)
    }
}

fn trigger_time_of(world: &WorldSnapshot) -> f64 {
    match world.playback {
        lf_state::PlaybackState::Playing { trigger_time_ms, .. } => trigger_time_ms,
        lf_state::PlaybackState::Stopped => 0.0,
    }
}

fn output_enabled(world: &WorldSnapshot, output: OutputId) -> bool {
    match output {
        OutputId::Projector(id) => world.projectors.get(&id).is_some_and(|p| p.enabled),
        OutputId::Virtual(id) => world.virtual_projectors.get(&id).is_some_and(|p| p.enabled),
    }
}

fn projector_chain(world: &WorldSnapshot, output: OutputId) -> &[lf_effects::ChainItem] {
    match output {
        OutputId::Projector(id) => world
            .projectors
            .get(&id)
            .map(|p| p.effect_chain.as_slice())
            .unwrap_or(&[]),
        OutputId::Virtual(id) => world
            .virtual_projectors
            .get(&id)
            .map(|p| p.effect_chain.as_slice())
            .unwrap_or(&[]),
    }
}
