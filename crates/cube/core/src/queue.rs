//! Rotation queue and animation scheduler.
//!
//! All mutation funnels through one FIFO: quarter turns animate over a
//! duration and commit exactly once at full progress; bulk replaces and
//! single-sticker edits ride the same queue as instant entries, so nothing
//! ever busy-waits for the animation to finish. At most one turn is in
//! flight at a time, and FIFO order is both the visual and the logical
//! commit order.

use std::collections::VecDeque;
use std::f32::consts::FRAC_PI_2;
use std::time::Duration;

use strum::IntoEnumIterator;

use crate::moves::Move;
use crate::rng::ScrambleRng;
use crate::rotation::RotationEngine;
use crate::state::{
    Color, CubeState, Direction, EditError, Face, LatticePos, Piece, Slot, StateShapeError,
    PIECE_COUNT,
};

/// Maximum number of committed turns kept for undo.
pub const MAX_HISTORY: usize = 64;

/// Default scramble length.
pub const DEFAULT_SCRAMBLE_LEN: usize = 20;

/// One scheduled quarter turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RotationRequest {
    pub face: Face,
    pub direction: Direction,
    pub duration: Duration,
    /// Whether the committed turn enters the undo history. Inverse turns
    /// enqueued by [`RotationQueue::undo`] are not themselves recorded.
    record: bool,
}

/// A queue entry: an animated turn or an instant deferred mutation.
#[derive(Clone, Debug)]
enum QueuedOp {
    Turn(RotationRequest),
    Replace(Box<[Piece; PIECE_COUNT]>),
    SetSticker {
        position: LatticePos,
        slot: Slot,
        color: Color,
    },
}

/// What happened during an [`RotationQueue::advance`] call, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueueEvent {
    TurnStarted { face: Face, direction: Direction },
    TurnCommitted { face: Face, direction: Direction },
    Replaced,
    StickerSet {
        position: LatticePos,
        slot: Slot,
        color: Color,
    },
    /// The queue just transitioned from animating back to idle.
    Drained,
}

struct InFlight {
    request: RotationRequest,
    elapsed: Duration,
}

/// FIFO scheduler serializing every mutation of a [`CubeState`].
pub struct RotationQueue {
    pending: VecDeque<QueuedOp>,
    in_flight: Option<InFlight>,
    history: VecDeque<RotationRequest>,
}

impl Default for RotationQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl RotationQueue {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
            in_flight: None,
            history: VecDeque::new(),
        }
    }

    /// Schedules one quarter turn. Starts interpolating on the next
    /// [`advance`](Self::advance) tick if the queue is idle, otherwise waits
    /// its turn in FIFO order.
    pub fn enqueue_turn(&mut self, face: Face, direction: Direction, duration: Duration) {
        self.pending.push_back(QueuedOp::Turn(RotationRequest {
            face,
            direction,
            duration,
            record: true,
        }));
    }

    /// Schedules a parsed move; a half turn becomes two quarter turns in the
    /// same direction.
    pub fn enqueue_move(&mut self, mv: Move, duration: Duration) {
        for (face, direction) in mv.quarter_turns() {
            self.enqueue_turn(face, direction, duration);
        }
    }

    /// Schedules a bulk state replacement behind any in-flight turns.
    ///
    /// The piece set is validated now so the later commit cannot fail.
    pub fn enqueue_replace(&mut self, pieces: &[Piece]) -> Result<(), StateShapeError> {
        CubeState::validate(pieces)?;
        let mut boxed = Box::new([Piece::blank(LatticePos::ORIGIN); PIECE_COUNT]);
        boxed.copy_from_slice(pieces);
        self.pending.push_back(QueuedOp::Replace(boxed));
        Ok(())
    }

    /// Schedules a single-sticker edit behind any in-flight turns.
    ///
    /// Outwardness depends only on the position, never on which piece has
    /// rotated into it, so validating here stays correct no matter how many
    /// turns commit first.
    pub fn enqueue_set_sticker(
        &mut self,
        position: LatticePos,
        slot: Slot,
        color: Color,
    ) -> Result<(), EditError> {
        if !position.is_piece_position() {
            return Err(EditError::NoPiece { position });
        }
        if position.component(slot.axis()) != slot.sign() {
            return Err(EditError::InteriorSlot { position, slot });
        }
        self.pending
            .push_back(QueuedOp::SetSticker { position, slot, color });
        Ok(())
    }

    /// Enqueues `count` uniformly random quarter turns.
    ///
    /// The result is a reachable random state, not a maximally mixed one.
    pub fn scramble(
        &mut self,
        rng: &mut ScrambleRng,
        count: usize,
        duration: Duration,
    ) {
        for _ in 0..count {
            let face = Face::iter()
                .nth(rng.below(6) as usize)
                .expect("face index below six");
            let direction = if rng.below(2) == 0 {
                Direction::Plus
            } else {
                Direction::Minus
            };
            self.enqueue_turn(face, direction, duration);
        }
    }

    /// Discards everything pending plus the in-flight turn and rebuilds the
    /// canonical solved state wholesale.
    pub fn reset(&mut self, state: &mut CubeState) {
        self.pending.clear();
        self.in_flight = None;
        self.history.clear();
        *state = CubeState::solved();
    }

    /// Schedules the inverse of the most recent recorded turn. Returns false
    /// when the history is empty.
    pub fn undo(&mut self, duration: Duration) -> bool {
        let Some(request) = self.history.pop_back() else {
            return false;
        };
        self.pending.push_back(QueuedOp::Turn(RotationRequest {
            face: request.face,
            direction: request.direction.inverse(),
            duration,
            record: false,
        }));
        true
    }

    /// Advances the animation clock by `elapsed` and drives every commit
    /// that becomes due: the in-flight turn commits exactly once at full
    /// progress, then the next entry starts immediately (instant entries
    /// commit on the spot). Returns what happened, in order.
    pub fn advance(&mut self, state: &mut CubeState, elapsed: Duration) -> Vec<QueueEvent> {
        let mut events = Vec::new();
        let was_busy = self.is_busy();

        match &mut self.in_flight {
            Some(in_flight) => {
                in_flight.elapsed = in_flight.elapsed.saturating_add(elapsed);
            }
            None => self.start_next(state, &mut events),
        }

        while let Some(in_flight) = &self.in_flight {
            if in_flight.elapsed < in_flight.request.duration {
                break;
            }
            let request = self
                .in_flight
                .take()
                .expect("in-flight turn checked above")
                .request;
            RotationEngine::new(state).turn(request.face, request.direction);
            if request.record {
                self.push_history(request);
            }
            events.push(QueueEvent::TurnCommitted {
                face: request.face,
                direction: request.direction,
            });
            // A freshly started turn animates from progress zero; leftover
            // frame time is not carried over.
            self.start_next(state, &mut events);
        }

        if was_busy && !self.is_busy() {
            events.push(QueueEvent::Drained);
        }
        events
    }

    /// Whether any entry is in flight or pending.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some() || !self.pending.is_empty()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// The turn currently interpolating, if any.
    pub fn in_flight(&self) -> Option<(Face, Direction)> {
        self.in_flight
            .as_ref()
            .map(|in_flight| (in_flight.request.face, in_flight.request.direction))
    }

    /// Raw interpolation progress of the in-flight turn in `0..=1`.
    pub fn progress(&self) -> f32 {
        match &self.in_flight {
            None => 0.0,
            Some(in_flight) if in_flight.request.duration.is_zero() => 1.0,
            Some(in_flight) => (in_flight.elapsed.as_secs_f32()
                / in_flight.request.duration.as_secs_f32())
            .min(1.0),
        }
    }

    /// Eased signed angle in radians for the in-flight turn. Purely visual;
    /// the commit applies the exact quarter-turn matrix.
    pub fn current_angle(&self) -> f32 {
        match &self.in_flight {
            None => 0.0,
            Some(in_flight) => {
                ease_in_out_cubic(self.progress())
                    * FRAC_PI_2
                    * f32::from(in_flight.request.direction.signum())
            }
        }
    }

    fn start_next(&mut self, state: &mut CubeState, events: &mut Vec<QueueEvent>) {
        while let Some(op) = self.pending.pop_front() {
            match op {
                QueuedOp::Turn(request) => {
                    events.push(QueueEvent::TurnStarted {
                        face: request.face,
                        direction: request.direction,
                    });
                    self.in_flight = Some(InFlight {
                        request,
                        elapsed: Duration::ZERO,
                    });
                    return;
                }
                QueuedOp::Replace(pieces) => {
                    state
                        .replace(&pieces[..])
                        .expect("replace entries are validated at enqueue");
                    // A bulk overwrite invalidates the recorded move trail.
                    self.history.clear();
                    events.push(QueueEvent::Replaced);
                }
                QueuedOp::SetSticker { position, slot, color } => {
                    state
                        .set_sticker(position, slot, color)
                        .expect("sticker edits are validated at enqueue");
                    events.push(QueueEvent::StickerSet { position, slot, color });
                }
            }
        }
    }

    fn push_history(&mut self, request: RotationRequest) {
        if self.history.len() == MAX_HISTORY {
            self.history.pop_front();
        }
        self.history.push_back(request);
    }
}

/// Ease-in-out-cubic shaping for the visual rotation angle:
/// `4t³` below the midpoint, `1 - (-2t+2)³/2` above it.
pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}
