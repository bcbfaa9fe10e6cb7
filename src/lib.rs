pub mod board;
pub mod engine;
pub mod error;
pub mod game;
pub mod legality;
pub mod movegen;
pub mod moves;
pub mod piece;
pub mod render;
pub mod snapshot;

pub use error::{ChessError, Result};
