//! Cloneable client facade over the simulation worker.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::info;

use cube_core::{
    Color, CubeState, Direction, EditError, Face, LatticePos, Move, Piece, Slot, StateShapeError,
    parse_sequence,
};

use crate::error::{Result, RuntimeError};
use crate::events::CubeEvent;
use crate::gateway::SolverGateway;
use crate::worker::Command;

/// Handle for driving the cube from any task.
///
/// All mutation commands are fire-and-forget into the worker's FIFO; query
/// commands round-trip a oneshot reply. Clones share the same worker.
#[derive(Clone)]
pub struct CubeHandle {
    command_tx: mpsc::Sender<Command>,
    event_tx: broadcast::Sender<CubeEvent>,
}

impl CubeHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_tx: broadcast::Sender<CubeEvent>,
    ) -> Self {
        Self {
            command_tx,
            event_tx,
        }
    }

    /// Subscribes to worker events. Each subscriber gets every event from
    /// the moment of subscription; lagging subscribers drop the oldest.
    pub fn subscribe(&self) -> broadcast::Receiver<CubeEvent> {
        self.event_tx.subscribe()
    }

    /// Schedules one quarter turn of `face`.
    pub async fn turn(&self, face: Face, direction: Direction) -> Result<()> {
        self.send(Command::Turn { face, direction }).await
    }

    /// Schedules an already-parsed move list in order.
    pub async fn apply_moves(&self, moves: Vec<Move>) -> Result<()> {
        self.send(Command::ApplyMoves { moves }).await
    }

    /// Parses a whitespace-separated sequence in standard notation
    /// (`"R U2 F'"`) and schedules it.
    pub async fn apply_sequence(&self, sequence: &str) -> Result<Vec<Move>> {
        let moves = parse_sequence(sequence)?;
        self.apply_moves(moves.clone()).await?;
        Ok(moves)
    }

    /// Schedules a random scramble; `count` of `None` uses the configured
    /// default length.
    pub async fn scramble(&self, count: Option<usize>) -> Result<()> {
        self.send(Command::Scramble { count }).await
    }

    /// Discards all pending work and restores the canonical solved state.
    pub async fn reset(&self) -> Result<()> {
        self.send(Command::Reset).await
    }

    /// Schedules the inverse of the most recent turn. Returns false when
    /// nothing is left to undo.
    pub async fn undo(&self) -> Result<bool> {
        self.request(|reply| Command::Undo { reply }).await
    }

    /// Schedules a single-sticker recolor behind any in-flight animation.
    pub async fn set_sticker(
        &self,
        position: LatticePos,
        slot: Slot,
        color: Color,
    ) -> Result<()> {
        let result: std::result::Result<(), EditError> = self
            .request(|reply| Command::SetSticker {
                position,
                slot,
                color,
                reply,
            })
            .await?;
        result.map_err(RuntimeError::from)
    }

    /// Schedules a bulk replacement of all 26 pieces.
    pub async fn replace(&self, pieces: Vec<Piece>) -> Result<()> {
        let result: std::result::Result<(), StateShapeError> = self
            .request(|reply| Command::Replace { pieces, reply })
            .await?;
        result.map_err(RuntimeError::from)
    }

    /// Returns a copy of the committed state, ignoring any in-flight
    /// interpolation.
    pub async fn snapshot(&self) -> Result<CubeState> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    /// The committed state as a 54-character color string in URFDLB face
    /// order, `.` for unset stickers.
    pub async fn encode(&self) -> Result<String> {
        self.request(|reply| Command::Encode { reply }).await
    }

    /// Whether any turn is animating or queued.
    pub async fn is_busy(&self) -> Result<bool> {
        self.request(|reply| Command::IsBusy { reply }).await
    }

    /// Asks the external solver for a solution to the committed state and
    /// schedules the returned moves.
    ///
    /// Fails without touching the cube when the state is not fully colored,
    /// when the gateway is unreachable, or when its answer does not parse.
    pub async fn request_solution(&self, gateway: &Arc<dyn SolverGateway>) -> Result<Vec<Move>> {
        let facelets: std::result::Result<String, cube_core::NetError> = self
            .request(|reply| Command::SolverRequest { reply })
            .await?;
        let facelets = facelets?;

        let answer = gateway
            .solve(&facelets)
            .await
            .map_err(RuntimeError::SolverUnavailable)?;
        info!(target: "runtime::solver", moves = %answer, "solver answered");

        let moves = parse_sequence(&answer)?;
        self.apply_moves(moves.clone()).await?;
        let _ = self.event_tx.send(CubeEvent::SolutionReceived {
            moves: moves.clone(),
        });
        Ok(moves)
    }

    async fn send(&self, command: Command) -> Result<()> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(build(reply_tx)).await?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }
}
