//! Authoritative cube state representation.
//!
//! This module owns the 26-piece store. Rotation layers clone or query this
//! state but mutate it exclusively through [`crate::rotation::RotationEngine`]
//! or the single-sticker edit path.

pub mod types;

pub use types::{Axis, Color, Direction, Face, FaceParseError, LatticePos, Piece, Slot};

use strum::IntoEnumIterator;

/// Number of movable pieces: the 27 lattice points minus the fixed origin.
pub const PIECE_COUNT: usize = 26;

/// Raised when a bulk replacement does not describe a well-formed cube.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StateShapeError {
    #[error("expected {PIECE_COUNT} pieces, got {found}")]
    WrongCount { found: usize },

    #[error("position {position} is off the lattice or at the origin")]
    InvalidPosition { position: LatticePos },

    #[error("two pieces occupy position {position}")]
    DuplicatePosition { position: LatticePos },

    #[error("piece at {position} carries a sticker on interior slot {slot:?}")]
    InteriorSticker { position: LatticePos, slot: Slot },
}

/// Raised when a single-sticker edit misses the cube surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("no piece at position {position}")]
    NoPiece { position: LatticePos },

    #[error("slot {slot:?} at {position} faces the cube interior")]
    InteriorSlot { position: LatticePos, slot: Slot },
}

/// The 26-piece store.
///
/// Invariants: piece positions form a bijection onto the non-origin lattice
/// points of `{-1,0,1}³`, and stickers only ever sit on outward-facing slots.
/// Outward slots may be uncolored while a state is being assembled from
/// photographs or manual edits; [`CubeState::is_fully_colored`] reports
/// completeness.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CubeState {
    pieces: [Piece; PIECE_COUNT],
}

impl CubeState {
    /// Canonical solved state: every outward slot carries its face's home
    /// color, every interior slot is empty.
    pub fn solved() -> Self {
        let mut state = Self::uncolored();
        for piece in &mut state.pieces {
            for face in Face::iter() {
                if piece.position.on_face(face) {
                    piece.set_sticker(face.outward_slot(), Some(face.home_color()));
                }
            }
        }
        state
    }

    /// All 26 pieces in canonical positions with no stickers at all.
    ///
    /// Starting point for decoding external representations.
    pub fn uncolored() -> Self {
        let mut pieces = [Piece::blank(LatticePos::new(1, 1, 1)); PIECE_COUNT];
        let mut index = 0;
        for x in -1..=1 {
            for y in -1..=1 {
                for z in -1..=1 {
                    let position = LatticePos::new(x, y, z);
                    if position.is_piece_position() {
                        pieces[index] = Piece::blank(position);
                        index += 1;
                    }
                }
            }
        }
        debug_assert_eq!(index, PIECE_COUNT);
        Self { pieces }
    }

    /// Read-only view of all pieces.
    #[inline]
    pub fn pieces(&self) -> &[Piece; PIECE_COUNT] {
        &self.pieces
    }

    /// Owned copy of all 26 pieces.
    pub fn snapshot(&self) -> [Piece; PIECE_COUNT] {
        self.pieces
    }

    /// The piece currently at `position`, if the position is valid.
    pub fn piece_at(&self, position: LatticePos) -> Option<&Piece> {
        self.pieces.iter().find(|piece| piece.position == position)
    }

    fn piece_at_mut(&mut self, position: LatticePos) -> Option<&mut Piece> {
        self.pieces
            .iter_mut()
            .find(|piece| piece.position == position)
    }

    /// Validates a candidate piece set without committing it.
    pub fn validate(pieces: &[Piece]) -> Result<(), StateShapeError> {
        if pieces.len() != PIECE_COUNT {
            return Err(StateShapeError::WrongCount {
                found: pieces.len(),
            });
        }

        // 27-cell occupancy grid indexed by (x+1, y+1, z+1).
        let mut seen = [false; 27];
        for piece in pieces {
            let position = piece.position;
            if !position.is_piece_position() {
                return Err(StateShapeError::InvalidPosition { position });
            }
            let cell = ((position.x + 1) * 9 + (position.y + 1) * 3 + (position.z + 1)) as usize;
            if seen[cell] {
                return Err(StateShapeError::DuplicatePosition { position });
            }
            seen[cell] = true;

            for slot in Slot::iter() {
                let outward = position.component(slot.axis()) == slot.sign();
                if !outward && piece.sticker(slot).is_some() {
                    return Err(StateShapeError::InteriorSticker { position, slot });
                }
            }
        }
        Ok(())
    }

    /// Replaces the whole state atomically; the current state is untouched on
    /// failure.
    pub fn replace(&mut self, pieces: &[Piece]) -> Result<(), StateShapeError> {
        Self::validate(pieces)?;
        let mut swapped = [Piece::blank(LatticePos::ORIGIN); PIECE_COUNT];
        swapped.copy_from_slice(pieces);
        self.pieces = swapped;
        Ok(())
    }

    /// Mutates exactly one sticker slot of the piece currently at `position`.
    pub fn set_sticker(
        &mut self,
        position: LatticePos,
        slot: Slot,
        color: Color,
    ) -> Result<(), EditError> {
        // Outwardness is a function of the position alone, so the check stays
        // valid no matter which piece has rotated into this position.
        if position.component(slot.axis()) != slot.sign() {
            return Err(EditError::InteriorSlot { position, slot });
        }
        let piece = self
            .piece_at_mut(position)
            .ok_or(EditError::NoPiece { position })?;
        piece.set_sticker(slot, Some(color));
        Ok(())
    }

    /// Whether every visible sticker has a color assigned.
    pub fn is_fully_colored(&self) -> bool {
        self.pieces.iter().all(|piece| {
            Slot::iter().all(|slot| {
                let outward = piece.position.component(slot.axis()) == slot.sign();
                !outward || piece.sticker(slot).is_some()
            })
        })
    }
}

impl Default for CubeState {
    fn default() -> Self {
        Self::solved()
    }
}
