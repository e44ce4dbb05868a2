pub mod geometry;
mod move_gen;
pub mod position;
pub mod types;

pub use geometry::{pawn_captures, piece_moves, squares_between};
pub use position::{PieceId, Position, Undo};
pub use types::*;
