//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, parsing boundaries, and the
//! solver gateway so clients can bubble them up with consistent context.

use thiserror::Error;
use tokio::sync::oneshot;

use cube_core::{EditError, MoveParseError, NetError, StateShapeError};

use crate::gateway::GatewayError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    State(#[from] StateShapeError),

    #[error(transparent)]
    Edit(#[from] EditError),

    #[error(transparent)]
    MoveParse(#[from] MoveParseError),

    #[error(transparent)]
    Net(#[from] NetError),

    /// The external solving service could not be reached or rejected the
    /// request. Surfaced, not fatal: the cube keeps working locally.
    #[error("solver gateway unavailable")]
    SolverUnavailable(#[source] GatewayError),
}
