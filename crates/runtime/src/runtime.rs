//! Runtime assembly: configuration, builder, and worker lifecycle.

use std::time::Duration;

use rand::Rng;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::info;

use cube_core::{CubeState, DEFAULT_SCRAMBLE_LEN, ScrambleRng};

use crate::error::{Result, RuntimeError};
use crate::handle::CubeHandle;
use crate::worker::SimulationWorker;

/// Tunable knobs for the simulation worker.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    /// How often the animation clock ticks.
    pub frame_interval: Duration,
    /// Duration of one interactively requested quarter turn.
    pub turn_duration: Duration,
    /// Duration of each scramble turn; shorter so scrambles feel snappy.
    pub scramble_turn_duration: Duration,
    /// Scramble length when the caller does not pick one.
    pub scramble_len: usize,
    /// Command channel depth.
    pub command_buffer_size: usize,
    /// Event broadcast depth per subscriber.
    pub event_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            frame_interval: Duration::from_millis(16),
            turn_duration: Duration::from_millis(250),
            scramble_turn_duration: Duration::from_millis(80),
            scramble_len: DEFAULT_SCRAMBLE_LEN,
            command_buffer_size: 32,
            event_buffer_size: 100,
        }
    }
}

/// Builder for [`Runtime`].
#[derive(Default)]
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    initial_state: Option<CubeState>,
    scramble_seed: Option<u64>,
}

impl RuntimeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Starts from the given state instead of the canonical solved cube.
    pub fn initial_state(mut self, state: CubeState) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Fixes the scramble seed for reproducible runs; defaults to a random
    /// seed.
    pub fn scramble_seed(mut self, seed: u64) -> Self {
        self.scramble_seed = Some(seed);
        self
    }

    /// Spawns the simulation worker and returns the running runtime.
    pub fn build(self) -> Runtime {
        let state = self.initial_state.unwrap_or_else(CubeState::solved);
        let seed = self
            .scramble_seed
            .unwrap_or_else(|| rand::rng().random::<u64>());

        let (command_tx, command_rx) = mpsc::channel(self.config.command_buffer_size);
        let (event_tx, _) = broadcast::channel(self.config.event_buffer_size);

        let worker = SimulationWorker::new(
            state,
            ScrambleRng::new(seed),
            self.config.clone(),
            command_rx,
            event_tx.clone(),
        );
        let worker_handle = tokio::spawn(worker.run());
        info!(target: "runtime", seed, "simulation worker started");

        Runtime {
            handle: CubeHandle::new(command_tx, event_tx),
            worker_handle,
        }
    }
}

/// Owns the spawned simulation worker.
pub struct Runtime {
    handle: CubeHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    pub fn handle(&self) -> CubeHandle {
        self.handle.clone()
    }

    /// Waits for the worker to stop. The worker exits once every
    /// [`CubeHandle`] clone is dropped and the command channel closes.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);
        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)?;
        info!(target: "runtime", "simulation worker stopped");
        Ok(())
    }
}
