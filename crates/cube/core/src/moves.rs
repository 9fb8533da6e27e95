//! Standard move notation exchanged with the external solver.
//!
//! A token is a face letter, an optional `'` for the reverse turn, and an
//! optional `2` for a half turn: `R`, `U'`, `F2`. A bare letter means
//! clockwise as viewed from outside the face; [`Face::clockwise`] translates
//! that into the engine's signed direction, so notation and geometry share
//! one handedness.

use core::fmt;
use core::str::FromStr;

use crate::state::{Direction, Face, FaceParseError};

/// Raised for a malformed external move token. Rejected at the parse
/// boundary, before any state is touched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveParseError {
    #[error("empty move token")]
    Empty,

    #[error(transparent)]
    Face(#[from] FaceParseError),

    #[error("unexpected suffix {suffix:?} in move token {token:?}")]
    BadSuffix { token: String, suffix: String },
}

/// One parsed move: a face, a resolved engine direction, and whether the
/// token asked for a half turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    pub face: Face,
    pub direction: Direction,
    pub half: bool,
}

impl Move {
    /// Clockwise quarter turn of `face` (the bare-letter token).
    pub const fn clockwise(face: Face) -> Self {
        Self {
            face,
            direction: face.clockwise(),
            half: false,
        }
    }

    /// Counterclockwise quarter turn of `face` (the `'` token).
    pub const fn counterclockwise(face: Face) -> Self {
        Self {
            face,
            direction: face.clockwise().inverse(),
            half: false,
        }
    }

    /// Half turn of `face` (the `2` token).
    pub const fn half(face: Face) -> Self {
        Self {
            face,
            direction: face.clockwise(),
            half: true,
        }
    }

    /// The move that undoes this one.
    pub const fn inverse(self) -> Self {
        Self {
            face: self.face,
            direction: self.direction.inverse(),
            half: self.half,
        }
    }

    /// Number of scheduled quarter turns: 1, or 2 for a half turn.
    pub const fn turn_count(self) -> usize {
        if self.half { 2 } else { 1 }
    }

    /// The quarter turns this move schedules, in order.
    pub fn quarter_turns(self) -> impl Iterator<Item = (Face, Direction)> {
        core::iter::repeat_n((self.face, self.direction), self.turn_count())
    }
}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let mut chars = token.chars();
        let letter = chars.next().ok_or(MoveParseError::Empty)?;
        let face = Face::from_letter(letter)?;

        match chars.as_str() {
            "" => Ok(Self::clockwise(face)),
            "'" => Ok(Self::counterclockwise(face)),
            "2" => Ok(Self::half(face)),
            suffix => Err(MoveParseError::BadSuffix {
                token: token.to_owned(),
                suffix: suffix.to_owned(),
            }),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.face.letter())?;
        if self.half {
            write!(f, "2")?;
        } else if self.direction != self.face.clockwise() {
            write!(f, "'")?;
        }
        Ok(())
    }
}

/// Parses a whitespace-separated move sequence such as a solver response
/// (`"D R2 F2 D' L2"`).
pub fn parse_sequence(input: &str) -> Result<Vec<Move>, MoveParseError> {
    input.split_whitespace().map(Move::from_str).collect()
}
