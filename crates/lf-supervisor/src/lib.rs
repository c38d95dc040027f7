//! Multi-engine supervision (§4.J).
//!
//! Owns one `StreamingEngine` per enabled output declared in the current
//! `WorldSnapshot`, and reconciles that set whenever the snapshot
//! changes: a newly enabled projector gets an engine started for it, a
//! removed or disabled one gets its engine stopped and dropped. Holding
//! the engines in a plain `HashMap` means the supervisor's own `Drop`
//! already stops everything — no separate teardown path to keep in sync.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use log::info;

use lf_core::{EngineStats, LfResult, OutputId};
use lf_engine::{EngineConfig, FrameProvider, StreamingEngine};
use lf_state::WorldSnapshot;

/// How long `remove_engine`/`stop_all` wait for a thread to join before
/// giving up and reporting `LfError::ShutdownTimeout`.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(2);

pub struct MultiEngineSupervisor {
    world: Arc<ArcSwap<WorldSnapshot>>,
    provider: Arc<dyn FrameProvider>,
    fps: u32,
    engines: HashMap<OutputId, StreamingEngine>,
}

impl MultiEngineSupervisor {
    pub fn new(world: Arc<ArcSwap<WorldSnapshot>>, provider: Arc<dyn FrameProvider>, fps: u32) -> Self {
        Self {
            world,
            provider,
            fps,
            engines: HashMap::new(),
        }
    }

    pub fn engine_count(&self) -> usize {
        self.engines.len()
    }

    pub fn add_engine(&mut self, output: OutputId, config: EngineConfig) -> LfResult<()> {
        if self.engines.contains_key(&output) {
            return Ok(());
        }
        let mut engine = StreamingEngine::new(output, config, self.world.clone(), self.provider.clone())?;
        engine.start()?;
        info!("started engine for {output:?}");
        self.engines.insert(output, engine);
        Ok(())
    }

    pub fn remove_engine(&mut self, output: OutputId) -> LfResult<()> {
        if let Some(mut engine) = self.engines.remove(&output) {
            engine.stop(SHUTDOWN_TIMEOUT)?;
            info!("stopped engine for {output:?}");
        }
        Ok(())
    }

    pub fn start_all(&mut self) -> LfResult<()> {
        self.reconcile()
    }

    pub fn stop_all(&mut self) -> LfResult<()> {
        let outputs: Vec<OutputId> = self.engines.keys().copied().collect();
        for output in outputs {
            self.remove_engine(output)?;
        }
        Ok(())
    }

    pub fn get_stats(&self) -> HashMap<OutputId, EngineStats> {
        self.engines.iter().map(|(id, engine)| (*id, engine.stats())).collect()
    }

    /// Starts engines for every enabled output declared in the current
    /// snapshot that doesn't already have one, and stops engines for any
    /// output that's gone or been disabled (§4.J).
    pub fn reconcile(&mut self) -> LfResult<()> {
        let desired = self.desired_engine_configs();

        let stale: Vec<OutputId> = self
            .engines
            .keys()
            .filter(|output| !desired.contains_key(output))
            .copied()
            .collect();
        for output in stale {
            self.remove_engine(output)?;
        }

        for (output, config) in desired {
            if !self.engines.contains_key(&output) {
                self.add_engine(output, config)?;
            }
        }

        Ok(())
    }

    fn desired_engine_configs(&self) -> HashMap<OutputId, EngineConfig> {
        let snapshot = self.world.load();
        let mut desired = HashMap::new();

        for projector in snapshot.projectors.values().filter(|p| p.enabled) {
            desired.insert(
                OutputId::Projector(projector.id),
                EngineConfig {
                    endpoint: projector.endpoint,
                    service_id: projector.service_id,
                    channel_id: projector.channel_id,
                    fps: self.fps,
                },
            );
        }
        for projector in snapshot.virtual_projectors.values().filter(|p| p.enabled) {
            desired.insert(
                OutputId::Virtual(projector.id),
                EngineConfig {
                    endpoint: projector.endpoint,
                    service_id: projector.service_id,
                    channel_id: projector.channel_id,
                    fps: self.fps,
                },
            );
        }

        desired
    }
}
