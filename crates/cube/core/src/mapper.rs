//! Lossless mapping among the three representations of the 54 visible
//! stickers: the 3D piece/slot store, the unfolded 2D net of six 3×3 grids,
//! and the flat 54-character exchange string.
//!
//! The per-face `(row, col)` formulas below are authoritative and applied
//! exactly once in each direction. Face order everywhere is the solver order
//! U, R, F, D, L, B with each face read row-major.

use strum::IntoEnumIterator;

use crate::state::{Color, CubeState, Face, LatticePos};

/// Placeholder for a visible sticker with no color assigned yet.
pub const BLANK_CODE: char = '.';

/// Raised when an external flat or net representation cannot be mapped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NetError {
    #[error("flat state must be 54 characters, got {found}")]
    BadLength { found: usize },

    #[error("unknown color code {code:?}")]
    UnknownColorCode { code: char },

    #[error("sticker {face}[{row}][{col}] has no color assigned")]
    MissingSticker { face: Face, row: usize, col: usize },

    #[error("center color {color} appears on more than one face")]
    AmbiguousCenters { color: Color },
}

/// One unfolded face: 3×3 cells, row-major.
pub type NetGrid = [[Option<Color>; 3]; 3];

/// The 2D net: six 3×3 grids addressed by face.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Net {
    faces: [NetGrid; 6],
}

impl Net {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn face(&self, face: Face) -> &NetGrid {
        &self.faces[face as usize]
    }

    pub fn face_mut(&mut self, face: Face) -> &mut NetGrid {
        &mut self.faces[face as usize]
    }

    pub fn get(&self, face: Face, row: usize, col: usize) -> Option<Color> {
        self.faces[face as usize][row][col]
    }

    pub fn set(&mut self, face: Face, row: usize, col: usize, color: Option<Color>) {
        self.faces[face as usize][row][col] = color;
    }
}

/// Net cell of a lattice position on `face`, or `None` if the position is
/// not in that face's layer.
///
/// Per-face rules (U and D pivot on z, the side faces on y):
/// - U: row = z+1, col = x+1
/// - D: row = 1−z, col = x+1
/// - R: row = 1−y, col = 1−z
/// - L: row = 1−y, col = z+1
/// - F: row = 1−y, col = x+1
/// - B: row = 1−y, col = 1−x
pub fn face_cell(face: Face, pos: LatticePos) -> Option<(usize, usize)> {
    if !pos.on_face(face) {
        return None;
    }
    let (row, col) = match face {
        Face::Up => (pos.z + 1, pos.x + 1),
        Face::Down => (1 - pos.z, pos.x + 1),
        Face::Right => (1 - pos.y, 1 - pos.z),
        Face::Left => (1 - pos.y, pos.z + 1),
        Face::Front => (1 - pos.y, pos.x + 1),
        Face::Back => (1 - pos.y, 1 - pos.x),
    };
    Some((row as usize, col as usize))
}

/// Exact inverse of [`face_cell`]: the lattice position showing at
/// `(row, col)` of `face`.
pub fn cell_position(face: Face, row: usize, col: usize) -> LatticePos {
    debug_assert!(row < 3 && col < 3);
    let (row, col) = (row as i8, col as i8);
    match face {
        Face::Up => LatticePos::new(col - 1, 1, row - 1),
        Face::Down => LatticePos::new(col - 1, -1, 1 - row),
        Face::Right => LatticePos::new(1, 1 - row, 1 - col),
        Face::Left => LatticePos::new(-1, 1 - row, col - 1),
        Face::Front => LatticePos::new(col - 1, 1 - row, 1),
        Face::Back => LatticePos::new(1 - col, 1 - row, -1),
    }
}

/// Projects the 3D state onto the 2D net.
pub fn net_from_state(state: &CubeState) -> Net {
    let mut net = Net::empty();
    for face in Face::iter() {
        let slot = face.outward_slot();
        for piece in state.pieces() {
            if let Some((row, col)) = face_cell(face, piece.position) {
                net.set(face, row, col, piece.sticker(slot));
            }
        }
    }
    net
}

/// Writes a net back into a 3D state with canonical piece positions.
///
/// Cells left unset default to "no sticker"; piece identity is not
/// recoverable from a net, only the per-cell color assignment.
pub fn state_from_net(net: &Net) -> CubeState {
    let mut state = CubeState::uncolored();
    for face in Face::iter() {
        for row in 0..3 {
            for col in 0..3 {
                if let Some(color) = net.get(face, row, col) {
                    state
                        .set_sticker(cell_position(face, row, col), face.outward_slot(), color)
                        .expect("net cells map onto outward slots");
                }
            }
        }
    }
    state
}

/// Flat 54-character color string, faces in U R F D L B order, each face
/// row-major. Unset stickers render as [`BLANK_CODE`].
pub fn encode(state: &CubeState) -> String {
    let net = net_from_state(state);
    let mut out = String::with_capacity(54);
    for face in Face::iter() {
        for row in 0..3 {
            for col in 0..3 {
                out.push(net.get(face, row, col).map_or(BLANK_CODE, Color::code));
            }
        }
    }
    out
}

/// Inverse of [`encode`]: reproduces the per-cell color assignment on
/// canonical piece positions.
pub fn decode(flat: &str) -> Result<CubeState, NetError> {
    let chars: Vec<char> = flat.chars().collect();
    if chars.len() != 54 {
        return Err(NetError::BadLength { found: chars.len() });
    }

    let mut net = Net::empty();
    let mut cursor = chars.into_iter();
    for face in Face::iter() {
        for row in 0..3 {
            for col in 0..3 {
                let code = cursor.next().expect("length checked above");
                let color = if code == BLANK_CODE {
                    None
                } else {
                    Some(Color::from_code(code).ok_or(NetError::UnknownColorCode { code })?)
                };
                net.set(face, row, col, color);
            }
        }
    }
    Ok(state_from_net(&net))
}

/// Builds the solver request string: 54 face letters in U R F D L B order.
///
/// The color-to-face assignment is derived from the six center stickers
/// rather than the canonical palette, so a cube photographed under any
/// orientation still maps consistently. Duplicate centers or unset stickers
/// are rejected before anything reaches the solver.
pub fn solver_request(state: &CubeState) -> Result<String, NetError> {
    let net = net_from_state(state);

    // Center-driven dynamic color map.
    let mut letter_for_color: [Option<Face>; 6] = [None; 6];
    for face in Face::iter() {
        let color = net
            .get(face, 1, 1)
            .ok_or(NetError::MissingSticker { face, row: 1, col: 1 })?;
        let entry = &mut letter_for_color[color as usize];
        if entry.is_some() {
            return Err(NetError::AmbiguousCenters { color });
        }
        *entry = Some(face);
    }

    let mut out = String::with_capacity(54);
    for face in Face::iter() {
        for row in 0..3 {
            for col in 0..3 {
                let color = net
                    .get(face, row, col)
                    .ok_or(NetError::MissingSticker { face, row, col })?;
                let letter = letter_for_color[color as usize]
                    .expect("all six centers were assigned above");
                out.push(letter.letter());
            }
        }
    }
    Ok(out)
}
