//! Laser streaming core demo harness.
//!
//! Assembles a minimal in-memory `WorldSnapshot` — one projector, one
//! cue — and drives the multi-engine supervisor against it for a fixed
//! duration, logging per-engine stats as it goes. There is no editor or
//! input routing here; those are external collaborators (§1 Non-goals).
//! This binary exists so the streaming core can be exercised end to end
//! without one.

use std::net::SocketAddr;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use arc_swap::ArcSwap;
use log::info;

use lf_core::{CellCoord, Frame, OutputConfig, OutputId, Point, ProjectorId};
use lf_engine::WorldFrameProvider;
use lf_state::{CueChain, CuePresetItem, PlaybackState, Preset, Projector, WorldSnapshot};
use lf_supervisor::MultiEngineSupervisor;

/// A slowly rotating single point, just enough to prove frames are
/// actually varying tick to tick.
struct OrbitPreset;

impl Preset for OrbitPreset {
    fn get_frame(&self, elapsed_ms: f64) -> Frame {
        let theta = (elapsed_ms / 2000.0) * std::f64::consts::TAU;
        let x = (theta.cos() * 20000.0) as i16;
        let y = (theta.sin() * 20000.0) as i16;
        Frame::from_points(vec![Point::new(x, y, 0xFFFF, 0x4000, 0x1000)])
    }
}

fn demo_snapshot() -> WorldSnapshot {
    let mut world = WorldSnapshot::new(OutputConfig::default(), 120.0);

    let projector_id = ProjectorId::new(1);
    let endpoint: SocketAddr = "127.0.0.1:7255".parse().expect("valid loopback address");
    world
        .projectors
        .insert(projector_id, Projector::new(projector_id, "demo-projector", endpoint));

    let cell = CellCoord::new(0, 0);
    let mut cue = CueChain::new(cell);
    cue.items.push(CuePresetItem::new(Arc::new(OrbitPreset)));
    cue.default_targets.push(OutputId::Projector(projector_id));
    world.cues.push(cue);
    world.playback = PlaybackState::Playing {
        active_cell: cell,
        trigger_time_ms: 0.0,
    };

    world
}

fn main() {
    env_logger::init();
    info!("starting laser streaming core demo harness");

    let snapshot = demo_snapshot();
    if let Err(err) = snapshot.validate() {
        panic!("demo snapshot failed validation: {err}");
    }

    let world = Arc::new(ArcSwap::from_pointee(snapshot));
    let provider = Arc::new(WorldFrameProvider::default());
    let mut supervisor = MultiEngineSupervisor::new(world, provider, 30);

    supervisor.start_all().expect("failed to start streaming engines");
    info!("{} engine(s) running", supervisor.engine_count());

    for _ in 0..50 {
        thread::sleep(Duration::from_millis(100));
        for (output, stats) in supervisor.get_stats() {
            info!(
                "{output:?}: frames_sent={} actual_fps={:.1} degraded={}",
                stats.frames_sent, stats.actual_fps, stats.degraded
            );
        }
    }

    supervisor.stop_all().expect("failed to stop streaming engines cleanly");
    info!("demo harness complete");
}
