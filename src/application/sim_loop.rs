use std::io;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{info, warn};

use super::snapshot::Snapshot;
use super::state::SimulationState;

/// Receives a snapshot after every tick, paused or not.
pub trait FrameSink: Send + 'static {
    fn frame_ready(&mut self, snapshot: Snapshot);
}

impl<F> FrameSink for F
where
    F: FnMut(Snapshot) + Send + 'static,
{
    fn frame_ready(&mut self, snapshot: Snapshot) {
        self(snapshot)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopStatus {
    Running,
    Stopped,
}

/// Background task ticking a [`SimulationState`] at its configured cadence.
///
/// The interval comes from the state, which rejects a zero interval at
/// construction. The loop runs until [`SimulationLoop::stop`] is called or
/// the handle is dropped. Stopped is terminal.
pub struct SimulationLoop {
    stop_tx: Option<Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl SimulationLoop {
    /// Start ticking immediately on a dedicated thread
    pub fn spawn(state: Arc<SimulationState>, sink: impl FrameSink) -> io::Result<Self> {
        let interval = state.tick_interval();
        let (stop_tx, stop_rx) = mpsc::channel();
        let thread = thread::Builder::new()
            .name("simulation-loop".into())
            .spawn(move || run(&state, interval, sink, &stop_rx))?;

        Ok(Self {
            stop_tx: Some(stop_tx),
            thread: Some(thread),
        })
    }

    pub fn status(&self) -> LoopStatus {
        match &self.thread {
            Some(thread) if !thread.is_finished() => LoopStatus::Running,
            _ => LoopStatus::Stopped,
        }
    }

    /// Signal the loop and wait for its thread to exit
    pub fn stop(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            // A send error means the thread is already gone
            let _ = stop_tx.send(());
        }
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("Simulation loop thread panicked");
            }
        }
    }
}

impl Drop for SimulationLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run(state: &SimulationState, interval: Duration, mut sink: impl FrameSink, stop_rx: &Receiver<()>) {
    info!(interval_ms = interval.as_millis() as u64, "Simulation loop started");
    let mut frames: u64 = 0;

    loop {
        sink.frame_ready(state.tick_and_snapshot());
        frames += 1;

        // The state lock is not held while waiting
        match stop_rx.recv_timeout(interval) {
            Err(RecvTimeoutError::Timeout) => continue,
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    info!(frames, "Simulation loop stopped");
}
