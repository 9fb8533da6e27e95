//! Broadcast events published by the simulation worker.

use cube_core::{Color, Direction, Face, LatticePos, Move, QueueEvent, Slot};

/// Everything observers can learn about the cube without polling.
#[derive(Clone, Debug, PartialEq)]
pub enum CubeEvent {
    /// A quarter turn began interpolating.
    TurnStarted { face: Face, direction: Direction },
    /// A quarter turn committed into the piece store.
    TurnCommitted { face: Face, direction: Direction },
    /// The whole piece set was overwritten (bulk load or reset).
    StateReplaced,
    /// A single sticker was recolored.
    StickerSet {
        position: LatticePos,
        slot: Slot,
        color: Color,
    },
    /// The queue finished everything and went idle.
    QueueDrained,
    /// The solver gateway answered; its moves are now enqueued.
    SolutionReceived { moves: Vec<Move> },
}

impl From<QueueEvent> for CubeEvent {
    fn from(event: QueueEvent) -> Self {
        match event {
            QueueEvent::TurnStarted { face, direction } => Self::TurnStarted { face, direction },
            QueueEvent::TurnCommitted { face, direction } => {
                Self::TurnCommitted { face, direction }
            }
            QueueEvent::Replaced => Self::StateReplaced,
            QueueEvent::StickerSet {
                position,
                slot,
                color,
            } => Self::StickerSet {
                position,
                slot,
                color,
            },
            QueueEvent::Drained => Self::QueueDrained,
        }
    }
}
