use thiserror::Error;

use crate::moves::Move;
use crate::piece::Color;

/// Errors surfaced by board mutation and the game session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// Input does not look like `E2-E4`.
    #[error("malformed move notation: {0:?} (expected e.g. E2-E4)")]
    MalformedNotation(String),

    #[error("coordinate out of range: rank {rank}, file {file} (must be 0-7)")]
    OutOfRange { rank: i32, file: i32 },

    /// Only raised by the game session when strict legality checking is on.
    #[error("illegal move: {0}")]
    IllegalMove(Move),

    #[error("{0:?} has no legal moves")]
    NoLegalMoves(Color),
}

pub type Result<T> = std::result::Result<T, ChessError>;
