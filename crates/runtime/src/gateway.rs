//! Seam to the external solving service.
//!
//! The runtime only ever exchanges flat strings with the solver: the request
//! is the 54-character facelet state grouped by face, the response an
//! ordered move list in standard notation (`"D R2 F2 D' L2"`). Transport,
//! retries, and timeouts are the implementor's concern; from the engine's
//! point of view the call is fire-and-forget.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("solver service unreachable: {0}")]
    Unavailable(String),

    #[error("solver rejected the state: {0}")]
    Rejected(String),
}

/// External solver collaborator.
#[async_trait]
pub trait SolverGateway: Send + Sync {
    /// Computes a solving sequence for the given facelet state.
    async fn solve(&self, facelets: &str) -> Result<String, GatewayError>;
}
