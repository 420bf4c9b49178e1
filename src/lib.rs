mod core;

// module re-exports
pub use crate::core::*;

pub use crate::core::engine::{Board, Color, ParseFenError, Piece, PieceType};
pub use crate::core::game::{Game, GameStatus};
pub use crate::core::utils::{ParseSquareError, Square};
