//! Primitive vocabulary shared across the crate: axes, faces, colors,
//! sticker slots, lattice positions, and pieces.

use core::fmt;
use core::str::FromStr;

use strum::EnumIter;

/// One of the three rotation axes of the cube lattice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Quarter-turn sense about an axis.
///
/// `Plus` is the right-hand-rule positive rotation about the face's global
/// axis. This handedness is fixed here once; the position matrices, sticker
/// cycles, and move-token mapping all derive from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Plus,
    Minus,
}

impl Direction {
    /// Signed magnitude of the turn: `+1` or `-1`.
    #[inline]
    pub const fn signum(self) -> i8 {
        match self {
            Self::Plus => 1,
            Self::Minus => -1,
        }
    }

    /// The opposite quarter turn.
    #[inline]
    pub const fn inverse(self) -> Self {
        match self {
            Self::Plus => Self::Minus,
            Self::Minus => Self::Plus,
        }
    }
}

/// One of the six outer faces, identified by a letter and a fixed axis/layer.
///
/// Declaration order is the flat solver-string face order (U, R, F, D, L, B),
/// so iteration visits faces in encoding order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Face {
    Up,
    Right,
    Front,
    Down,
    Left,
    Back,
}

/// Raised when a face letter outside `U D L R F B` reaches the parse boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown face letter {0:?}")]
pub struct FaceParseError(pub char);

impl Face {
    /// The lattice axis this face is perpendicular to.
    #[inline]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Right | Self::Left => Axis::X,
            Self::Up | Self::Down => Axis::Y,
            Self::Front | Self::Back => Axis::Z,
        }
    }

    /// The fixed lattice value of this face along its axis: `+1` or `-1`.
    #[inline]
    pub const fn layer(self) -> i8 {
        match self {
            Self::Right | Self::Up | Self::Front => 1,
            Self::Left | Self::Down | Self::Back => -1,
        }
    }

    /// Standard single-letter face name.
    pub const fn letter(self) -> char {
        match self {
            Self::Up => 'U',
            Self::Down => 'D',
            Self::Left => 'L',
            Self::Right => 'R',
            Self::Front => 'F',
            Self::Back => 'B',
        }
    }

    pub const fn from_letter(letter: char) -> Result<Self, FaceParseError> {
        match letter {
            'U' => Ok(Self::Up),
            'D' => Ok(Self::Down),
            'L' => Ok(Self::Left),
            'R' => Ok(Self::Right),
            'F' => Ok(Self::Front),
            'B' => Ok(Self::Back),
            other => Err(FaceParseError(other)),
        }
    }

    /// Home sticker color of this face in the canonical solved state.
    pub const fn home_color(self) -> Color {
        match self {
            Self::Up => Color::White,
            Self::Down => Color::Yellow,
            Self::Front => Color::Green,
            Self::Back => Color::Blue,
            Self::Right => Color::Red,
            Self::Left => Color::Orange,
        }
    }

    /// Engine direction of a clockwise quarter turn as viewed from outside
    /// this face.
    ///
    /// Looking back toward the origin from the positive end of an axis, the
    /// right-hand-rule positive rotation appears counterclockwise, so the
    /// positive-layer faces invert.
    #[inline]
    pub const fn clockwise(self) -> Direction {
        if self.layer() > 0 {
            Direction::Minus
        } else {
            Direction::Plus
        }
    }

    /// Sticker slot facing outward on this face.
    #[inline]
    pub const fn outward_slot(self) -> Slot {
        Slot::from_axis(self.axis(), self.layer())
    }

    /// Lattice position of this face's center piece.
    pub const fn center(self) -> LatticePos {
        let mut pos = LatticePos::ORIGIN;
        match self.axis() {
            Axis::X => pos.x = self.layer(),
            Axis::Y => pos.y = self.layer(),
            Axis::Z => pos.z = self.layer(),
        }
        pos
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for Face {
    type Err = FaceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => Self::from_letter(letter),
            (first, _) => Err(FaceParseError(first.unwrap_or('\0'))),
        }
    }
}

/// Sticker color from the fixed six-color palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    White,
    Red,
    Green,
    Yellow,
    Orange,
    Blue,
}

impl Color {
    /// Single-letter color code used by the flat and net exchange formats.
    pub const fn code(self) -> char {
        match self {
            Self::White => 'w',
            Self::Yellow => 'y',
            Self::Red => 'r',
            Self::Orange => 'o',
            Self::Green => 'g',
            Self::Blue => 'b',
        }
    }

    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            'w' => Some(Self::White),
            'y' => Some(Self::Yellow),
            'r' => Some(Self::Red),
            'o' => Some(Self::Orange),
            'g' => Some(Self::Green),
            'b' => Some(Self::Blue),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Sticker slot on a piece, indexed by the fixed outward-normal order
/// `[+X, -X, +Y, -Y, +Z, -Z]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Slot {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl Slot {
    /// Index into a piece's sticker array.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::PosX => 0,
            Self::NegX => 1,
            Self::PosY => 2,
            Self::NegY => 3,
            Self::PosZ => 4,
            Self::NegZ => 5,
        }
    }

    #[inline]
    pub const fn axis(self) -> Axis {
        match self {
            Self::PosX | Self::NegX => Axis::X,
            Self::PosY | Self::NegY => Axis::Y,
            Self::PosZ | Self::NegZ => Axis::Z,
        }
    }

    /// Sign of the outward normal along this slot's axis.
    #[inline]
    pub const fn sign(self) -> i8 {
        match self {
            Self::PosX | Self::PosY | Self::PosZ => 1,
            Self::NegX | Self::NegY | Self::NegZ => -1,
        }
    }

    pub const fn from_axis(axis: Axis, sign: i8) -> Self {
        match (axis, sign >= 0) {
            (Axis::X, true) => Self::PosX,
            (Axis::X, false) => Self::NegX,
            (Axis::Y, true) => Self::PosY,
            (Axis::Y, false) => Self::NegY,
            (Axis::Z, true) => Self::PosZ,
            (Axis::Z, false) => Self::NegZ,
        }
    }

    /// Outward normal as a unit lattice vector.
    pub const fn normal(self) -> LatticePos {
        let mut pos = LatticePos::ORIGIN;
        match self.axis() {
            Axis::X => pos.x = self.sign(),
            Axis::Y => pos.y = self.sign(),
            Axis::Z => pos.z = self.sign(),
        }
        pos
    }
}

/// Discrete lattice position with each component in `{-1, 0, 1}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatticePos {
    pub x: i8,
    pub y: i8,
    pub z: i8,
}

impl LatticePos {
    pub const ORIGIN: Self = Self { x: 0, y: 0, z: 0 };

    pub const fn new(x: i8, y: i8, z: i8) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn component(self, axis: Axis) -> i8 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Whether every component lies in `{-1, 0, 1}`.
    pub const fn on_lattice(self) -> bool {
        self.x >= -1 && self.x <= 1 && self.y >= -1 && self.y <= 1 && self.z >= -1 && self.z <= 1
    }

    /// Whether this is one of the 26 valid piece positions (on the lattice,
    /// origin excluded).
    pub const fn is_piece_position(self) -> bool {
        self.on_lattice() && !(self.x == 0 && self.y == 0 && self.z == 0)
    }

    /// Whether this position lies in the given face's layer.
    #[inline]
    pub const fn on_face(self, face: Face) -> bool {
        self.component(face.axis()) == face.layer()
    }
}

impl fmt::Display for LatticePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.x, self.y, self.z)
    }
}

/// One of the 26 movable sub-cubes: its current lattice position plus six
/// sticker slots. `None` marks an interior facet with no sticker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    pub position: LatticePos,
    pub stickers: [Option<Color>; 6],
}

impl Piece {
    /// A piece with no stickers at the given position.
    pub const fn blank(position: LatticePos) -> Self {
        Self {
            position,
            stickers: [None; 6],
        }
    }

    #[inline]
    pub fn sticker(&self, slot: Slot) -> Option<Color> {
        self.stickers[slot.index()]
    }

    #[inline]
    pub fn set_sticker(&mut self, slot: Slot, color: Option<Color>) {
        self.stickers[slot.index()] = color;
    }
}
