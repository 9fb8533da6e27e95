//! Simulation worker that owns the authoritative [`cube_core::CubeState`].
//!
//! Receives commands from [`crate::handle::CubeHandle`], funnels every
//! mutation through the rotation queue, and publishes [`CubeEvent`]s. The
//! worker is the only task holding `&mut CubeState`, so the one-turn-in-
//! flight invariant holds by construction.

use std::time::Duration;

use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, trace, warn};

use cube_core::{
    mapper, Color, CubeState, Direction, EditError, Face, LatticePos, Move, NetError, Piece,
    RotationQueue, ScrambleRng, Slot, StateShapeError,
};

use crate::events::CubeEvent;
use crate::runtime::RuntimeConfig;

/// Commands accepted by the simulation worker.
pub(crate) enum Command {
    Turn {
        face: Face,
        direction: Direction,
    },
    ApplyMoves {
        moves: Vec<Move>,
    },
    Scramble {
        count: Option<usize>,
    },
    Reset,
    Undo {
        reply: oneshot::Sender<bool>,
    },
    SetSticker {
        position: LatticePos,
        slot: Slot,
        color: Color,
        reply: oneshot::Sender<Result<(), EditError>>,
    },
    Replace {
        pieces: Vec<Piece>,
        reply: oneshot::Sender<Result<(), StateShapeError>>,
    },
    Snapshot {
        reply: oneshot::Sender<CubeState>,
    },
    Encode {
        reply: oneshot::Sender<String>,
    },
    SolverRequest {
        reply: oneshot::Sender<Result<String, NetError>>,
    },
    IsBusy {
        reply: oneshot::Sender<bool>,
    },
}

/// Background task processing cube commands and animation frames.
pub(crate) struct SimulationWorker {
    state: CubeState,
    queue: RotationQueue,
    rng: ScrambleRng,
    config: RuntimeConfig,
    command_rx: mpsc::Receiver<Command>,
    event_tx: broadcast::Sender<CubeEvent>,
}

impl SimulationWorker {
    pub(crate) fn new(
        state: CubeState,
        rng: ScrambleRng,
        config: RuntimeConfig,
        command_rx: mpsc::Receiver<Command>,
        event_tx: broadcast::Sender<CubeEvent>,
    ) -> Self {
        Self {
            state,
            queue: RotationQueue::new(),
            rng,
            config,
            command_rx,
            event_tx,
        }
    }

    /// Main worker loop: commands interleaved with the frame tick that
    /// drives interpolation.
    pub(crate) async fn run(mut self) {
        let mut frames = tokio::time::interval(self.config.frame_interval);
        frames.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_frame = Instant::now();

        loop {
            tokio::select! {
                maybe_cmd = self.command_rx.recv() => {
                    match maybe_cmd {
                        Some(cmd) => self.handle_command(cmd),
                        None => break,
                    }
                }
                _ = frames.tick() => {
                    let now = Instant::now();
                    let elapsed = now.duration_since(last_frame);
                    last_frame = now;
                    self.tick(elapsed);
                }
            }
        }
        debug!(target: "runtime::worker", "command channel closed, worker stopping");
    }

    fn tick(&mut self, elapsed: Duration) {
        if !self.queue.is_busy() {
            return;
        }
        trace!(
            target: "runtime::worker",
            progress = self.queue.progress(),
            pending = self.queue.pending_len(),
            "frame"
        );
        for event in self.queue.advance(&mut self.state, elapsed) {
            if let cube_core::QueueEvent::TurnCommitted { face, direction } = event {
                debug!(target: "runtime::worker", %face, ?direction, "turn committed");
            }
            self.publish(event.into());
        }
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Turn { face, direction } => {
                self.queue
                    .enqueue_turn(face, direction, self.config.turn_duration);
            }
            Command::ApplyMoves { moves } => {
                for mv in moves {
                    self.queue.enqueue_move(mv, self.config.turn_duration);
                }
            }
            Command::Scramble { count } => {
                let count = count.unwrap_or(self.config.scramble_len);
                self.queue
                    .scramble(&mut self.rng, count, self.config.scramble_turn_duration);
                debug!(target: "runtime::worker", count, "scramble enqueued");
            }
            Command::Reset => {
                self.queue.reset(&mut self.state);
                debug!(target: "runtime::worker", "state reset to canonical");
                self.publish(CubeEvent::StateReplaced);
                self.publish(CubeEvent::QueueDrained);
            }
            Command::Undo { reply } => {
                let undone = self.queue.undo(self.config.turn_duration);
                Self::send_reply(reply, undone, "Undo");
            }
            Command::SetSticker {
                position,
                slot,
                color,
                reply,
            } => {
                let result = self.queue.enqueue_set_sticker(position, slot, color);
                Self::send_reply(reply, result, "SetSticker");
            }
            Command::Replace { pieces, reply } => {
                let result = self.queue.enqueue_replace(&pieces);
                Self::send_reply(reply, result, "Replace");
            }
            Command::Snapshot { reply } => {
                Self::send_reply(reply, self.state.clone(), "Snapshot");
            }
            Command::Encode { reply } => {
                Self::send_reply(reply, mapper::encode(&self.state), "Encode");
            }
            Command::SolverRequest { reply } => {
                Self::send_reply(reply, mapper::solver_request(&self.state), "SolverRequest");
            }
            Command::IsBusy { reply } => {
                Self::send_reply(reply, self.queue.is_busy(), "IsBusy");
            }
        }
    }

    fn publish(&self, event: CubeEvent) {
        // Send fails only when no observer is subscribed; that is fine.
        let _ = self.event_tx.send(event);
    }

    fn send_reply<T>(reply: oneshot::Sender<T>, value: T, command: &'static str) {
        if reply.send(value).is_err() {
            warn!(target: "runtime::worker", command, "reply channel closed (caller dropped)");
        }
    }
}
