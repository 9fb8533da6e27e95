//! Quarter-turn geometry and the rotation engine.
//!
//! The engine is the single mutation path for turns: it selects the nine
//! pieces in a face's layer, rotates their positions with the exact integer
//! quarter-turn matrix for the face's axis, permutes their stickers with the
//! matching 4-cycle, and commits all nine pieces in one step.

use strum::IntoEnumIterator;

use crate::state::{Axis, CubeState, Direction, Face, LatticePos, Piece, Slot};

/// Applies the exact 90° quarter-turn matrix for `axis` to a lattice point.
///
/// Integer arithmetic keeps repeated compositions on the lattice; there is no
/// floating-point drift to round away.
pub fn rotate_position(pos: LatticePos, axis: Axis, direction: Direction) -> LatticePos {
    let LatticePos { x, y, z } = pos;
    match (axis, direction) {
        (Axis::X, Direction::Plus) => LatticePos::new(x, -z, y),
        (Axis::X, Direction::Minus) => LatticePos::new(x, z, -y),
        (Axis::Y, Direction::Plus) => LatticePos::new(z, y, -x),
        (Axis::Y, Direction::Minus) => LatticePos::new(-z, y, x),
        (Axis::Z, Direction::Plus) => LatticePos::new(-y, x, z),
        (Axis::Z, Direction::Minus) => LatticePos::new(y, -x, z),
    }
}

/// Where the sticker in `slot` ends up after a quarter turn about `axis`.
///
/// A sticker's outward normal transforms exactly like a position vector, so
/// the two slots aligned with the axis map to themselves and the other four
/// advance through the per-axis 4-cycle.
pub fn rotate_slot(slot: Slot, axis: Axis, direction: Direction) -> Slot {
    let normal = rotate_position(slot.normal(), axis, direction);
    Slot::iter()
        .find(|candidate| candidate.normal() == normal)
        .expect("a rotated unit normal is always a unit normal")
}

/// Rotation engine borrowing the state it mutates.
///
/// Holding the only `&mut CubeState` makes a concurrent turn on the same
/// store unrepresentable; the queue is the sole caller in practice.
pub struct RotationEngine<'a> {
    state: &'a mut CubeState,
}

impl<'a> RotationEngine<'a> {
    pub fn new(state: &'a mut CubeState) -> Self {
        Self { state }
    }

    /// Applies one quarter turn of `face` in `direction`, committing all nine
    /// affected pieces at once.
    pub fn turn(&mut self, face: Face, direction: Direction) {
        let axis = face.axis();
        let mut pieces = self.state.snapshot();

        for piece in &mut pieces {
            if !piece.position.on_face(face) {
                continue;
            }
            *piece = turned_piece(piece, axis, direction);
        }

        debug_assert!(
            CubeState::validate(&pieces).is_ok(),
            "quarter turn left the lattice: {face} {direction:?}"
        );
        self.state
            .replace(&pieces)
            .expect("quarter turn preserves the piece bijection");
    }
}

fn turned_piece(piece: &Piece, axis: Axis, direction: Direction) -> Piece {
    let mut turned = Piece::blank(rotate_position(piece.position, axis, direction));
    for slot in Slot::iter() {
        turned.set_sticker(rotate_slot(slot, axis, direction), piece.sticker(slot));
    }
    turned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Color;
    use strum::IntoEnumIterator;

    fn turn(state: &mut CubeState, face: Face, direction: Direction) {
        RotationEngine::new(state).turn(face, direction);
    }

    #[test]
    fn sticker_cycles_match_the_axis_tables() {
        // About X, one Plus step: +Y → +Z → -Y → -Z → +Y.
        let cycle = [Slot::PosY, Slot::PosZ, Slot::NegY, Slot::NegZ];
        for (i, slot) in cycle.iter().enumerate() {
            assert_eq!(
                rotate_slot(*slot, Axis::X, Direction::Plus),
                cycle[(i + 1) % 4]
            );
            assert_eq!(
                rotate_slot(cycle[(i + 1) % 4], Axis::X, Direction::Minus),
                *slot
            );
        }
        // Axis-aligned slots never move.
        assert_eq!(rotate_slot(Slot::PosX, Axis::X, Direction::Plus), Slot::PosX);
        assert_eq!(rotate_slot(Slot::NegX, Axis::X, Direction::Minus), Slot::NegX);
    }

    #[test]
    fn four_quarter_turns_are_identity() {
        for face in Face::iter() {
            for direction in [Direction::Plus, Direction::Minus] {
                let mut state = CubeState::solved();
                for _ in 0..4 {
                    turn(&mut state, face, direction);
                }
                assert_eq!(state, CubeState::solved(), "{face} {direction:?}");
            }
        }
    }

    #[test]
    fn opposite_turns_cancel_exactly() {
        for face in Face::iter() {
            for direction in [Direction::Plus, Direction::Minus] {
                let mut state = CubeState::solved();
                // Mix first so cancellation is tested away from the identity.
                turn(&mut state, Face::Right, Direction::Plus);
                turn(&mut state, Face::Up, Direction::Minus);
                let before = state.clone();

                turn(&mut state, face, direction);
                turn(&mut state, face, direction.inverse());
                assert_eq!(state, before, "{face} {direction:?}");
            }
        }
    }

    #[test]
    fn right_plus_moves_the_top_front_corner_down() {
        let mut state = CubeState::solved();
        let start = LatticePos::new(1, 1, 1);
        let moved = *state.piece_at(start).unwrap();
        assert_eq!(moved.sticker(Slot::PosY), Some(Color::White));

        turn(&mut state, Face::Right, Direction::Plus);

        // X Plus matrix: (1,1,1) → (1,-1,1).
        let landed = state.piece_at(LatticePos::new(1, -1, 1)).unwrap();
        // +Y sticker advances one cycle step to +Z.
        assert_eq!(landed.sticker(Slot::PosZ), Some(Color::White));
        // The slot along the rotation axis keeps its sticker.
        assert_eq!(landed.sticker(Slot::PosX), moved.sticker(Slot::PosX));
    }

    #[test]
    fn only_the_selected_layer_moves() {
        let mut state = CubeState::solved();
        turn(&mut state, Face::Right, Direction::Plus);
        for piece in state.pieces() {
            if piece.position.x < 1 {
                // Off-layer pieces keep canonical coloring.
                let canonical = CubeState::solved();
                assert_eq!(
                    canonical.piece_at(piece.position).unwrap().stickers,
                    piece.stickers
                );
            }
        }
    }
}
