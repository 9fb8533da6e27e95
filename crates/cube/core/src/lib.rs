//! Deterministic 3×3×3 twisty-puzzle state model and transform engine.
//!
//! `cube-core` defines the canonical rules (piece store, quarter-turn
//! geometry, animation queue, coordinate mapping) and exposes pure APIs the
//! runtime shell and offline tools reuse. All state mutation flows through
//! [`rotation::RotationEngine`], serialized by [`queue::RotationQueue`].
pub mod mapper;
pub mod moves;
pub mod queue;
pub mod rng;
pub mod rotation;
pub mod selection;
pub mod state;

pub use mapper::{
    BLANK_CODE, Net, NetError, NetGrid, decode, encode, net_from_state, solver_request,
    state_from_net,
};
pub use moves::{Move, MoveParseError, parse_sequence};
pub use queue::{
    DEFAULT_SCRAMBLE_LEN, MAX_HISTORY, QueueEvent, RotationQueue, RotationRequest,
    ease_in_out_cubic,
};
pub use rng::ScrambleRng;
pub use rotation::{RotationEngine, rotate_position, rotate_slot};
pub use selection::{EditSession, Selection};
pub use state::{
    Axis, Color, CubeState, Direction, EditError, Face, FaceParseError, LatticePos, PIECE_COUNT,
    Piece, Slot, StateShapeError,
};
