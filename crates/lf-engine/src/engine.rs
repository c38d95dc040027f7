//! The streaming engine: one OS thread, one UDP socket, one projector
//! output (§4.I).
//!
//! Grounded in the same shape as an audio-over-IP transmitter: a
//! dedicated thread owns the socket and the monotonically increasing
//! sequence counter for the life of the stream, and publishes its
//! statistics for an external supervisor to read without locking the hot
//! path. Unlike that transmitter, `start`/`stop` here are RAII-shaped —
//! dropping a `StreamingEngine` stops it — per the redesign notes'
//! "explicit ownership over scoped acquisition".

use std::net::UdpSocket;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;
use crossbeam_channel::{bounded, Sender};
use log::{debug, warn};
use parking_lot::Mutex;

use lf_core::{BeatClock, EngineStats, LfError, LfResult, OutputId};
use lf_state::WorldSnapshot;
use lf_wire::{build_close_datagram, build_data_datagram};

use crate::provider::{FrameProvider, ProviderOutcome};

/// Per-engine configuration that does not change across restarts.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    pub endpoint: std::net::SocketAddr,
    pub service_id: u8,
    pub channel_id: u8,
    pub fps: u32,
}

/// Owns the socket and background thread streaming one output's frames.
pub struct StreamingEngine {
    output: OutputId,
    config: EngineConfig,
    world: Arc<ArcSwap<WorldSnapshot>>,
    provider: Arc<dyn FrameProvider>,
    stats: Arc<Mutex<EngineStats>>,
    thread: Option<JoinHandle<()>>,
    stop_tx: Option<Sender<()>>,
}

impl StreamingEngine {
    pub fn new(
        output: OutputId,
        config: EngineConfig,
        world: Arc<ArcSwap<WorldSnapshot>>,
        provider: Arc<dyn FrameProvider>,
    ) -> LfResult<Self> {
        if config.fps == 0 {
            return Err(LfError::InvalidFps(config.fps));
        }
        Ok(Self {
            output,
            config,
            world,
            provider,
            stats: Arc::new(Mutex::new(EngineStats::default())),
            thread: None,
            stop_tx: None,
        })
    }

    pub fn is_running(&self) -> bool {
        self.thread.is_some()
    }

    pub fn stats(&self) -> EngineStats {
        self.stats.lock().clone()
    }

    /// Spawns the pacing thread. A no-op if already running.
    pub fn start(&mut self) -> LfResult<()> {
        if self.thread.is_some() {
            return Ok(());
        }

        let socket = UdpSocket::bind("0.0.0.0:0")?;
        socket.connect(self.config.endpoint)?;

        let (stop_tx, stop_rx) = bounded(1);
        let world = self.world.clone();
        let provider = self.provider.clone();
        let stats = self.stats.clone();
        let output = self.output;
        let config = self.config;
        let frame_period = Duration::from_secs_f64(1.0 / config.fps as f64);

        let handle = thread::Builder::new()
            .name(format!("lf-engine-{output:?}"))
            .spawn(move || run_pacing_loop(output, config, world, provider, stats, stop_rx, socket, frame_period))
            .map_err(LfError::Io)?;

        self.thread = Some(handle);
        self.stop_tx = Some(stop_tx);
        Ok(())
    }

    /// Signals the pacing thread to stop and waits up to `timeout` for it
    /// to join. The thread itself still runs to completion in the
    /// background if the deadline is missed; this only bounds how long
    /// the caller waits.
    pub fn stop(&mut self, timeout: Duration) -> LfResult<()> {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        let Some(handle) = self.thread.take() else {
            return Ok(());
        };

        let (done_tx, done_rx) = bounded(1);
        thread::spawn(move || {
            let _ = handle.join();
            let _ = done_tx.send(());
        });

        match done_rx.recv_timeout(timeout) {
            Ok(()) => Ok(()),
            Err(_) => Err(LfError::ShutdownTimeout),
        }
    }
}

impl Drop for StreamingEngine {
    fn drop(&mut self) {
        if self.thread.is_some() {
            if let Err(err) = self.stop(Duration::from_secs(2)) {
                warn!("engine for {:?} did not shut down cleanly: {err}", self.output);
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn run_pacing_loop(
    output: OutputId,
    config: EngineConfig,
    world: Arc<ArcSwap<WorldSnapshot>>,
    provider: Arc<dyn FrameProvider>,
    stats: Arc<Mutex<EngineStats>>,
    stop_rx: crossbeam_channel::Receiver<()>,
    socket: UdpSocket,
    frame_period: Duration,
) {
    let clock_start = Instant::now();
    let mut sequence: u16 = 0;
    let mut sent_config_descriptor = false;

    // Owned by this thread and advanced exactly once per tick (§4.F):
    // the snapshot itself is immutable once published, so the running
    // beat/phase state cannot live there.
    let mut beat_clock = BeatClock::default();
    let mut last_tick_ms: Option<f64> = None;

    loop {
        if stop_rx.try_recv().is_ok() {
            break;
        }

        let tick_start = Instant::now();
        let now_ms = clock_start.elapsed().as_secs_f64() * 1000.0;
        let snapshot = world.load();

        let delta_ms = now_ms - last_tick_ms.unwrap_or(now_ms);
        last_tick_ms = Some(now_ms);
        beat_clock.phase_offset_target = snapshot.timing.clock.phase_offset_target;
        beat_clock.advance(delta_ms, snapshot.timing.bpm);
        let timing = beat_clock.timing_context(snapshot.timing.bpm);

        let frame = match provider.next_frame(&snapshot, output, now_ms, timing) {
            ProviderOutcome::Frame(frame) => Some(frame),
            ProviderOutcome::Skipped => Some(lf_core::Frame::empty()),
            ProviderOutcome::Fatal(err) => {
                stats.lock().record_degraded(now_ms, err.to_string());
                warn!("engine for {output:?} stopping after fatal provider error: {err}");
                break;
            }
        };

        if let Some(frame) = frame {
            let timestamp_us = (now_ms * 1000.0) as u32;
            let datagram = build_data_datagram(
                sequence,
                timestamp_us,
                config.channel_id,
                config.service_id,
                &snapshot.output_config,
                &frame,
                !sent_config_descriptor,
            );
            sent_config_descriptor = true;

            match socket.send(&datagram) {
                Ok(_) => {
                    let actual_fps = 1.0 / tick_start.elapsed().as_secs_f64().max(1e-6);
                    stats.lock().record_success(now_ms, actual_fps);
                }
                Err(err) => {
                    stats.lock().record_degraded(now_ms, err.to_string());
                }
            }
            sequence = sequence.wrapping_add(1);
        }

        let elapsed = tick_start.elapsed();
        if elapsed < frame_period {
            thread::sleep(frame_period - elapsed);
        }
    }

    let close = build_close_datagram(sequence, config.channel_id, config.service_id);
    if let Err(err) = socket.send(&close) {
        debug!("close datagram send failed during shutdown for {output:?}: {err}");
    }
}
