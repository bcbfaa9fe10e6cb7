//! Plain-text board drawing for the console binaries.
//!
//! Works only from a [`BoardSnapshot`], never from the live board.

use std::fmt;

use crate::piece::{Color, Piece, PieceType};
use crate::snapshot::{BoardSnapshot, Perspective};

pub fn glyph(piece: Piece) -> char {
    match (piece.color, piece.piece_type) {
        (Color::White, PieceType::King) => '♔',
        (Color::White, PieceType::Queen) => '♕',
        (Color::White, PieceType::Rook) => '♖',
        (Color::White, PieceType::Bishop) => '♗',
        (Color::White, PieceType::Knight) => '♘',
        (Color::White, PieceType::Pawn) => '♙',
        (Color::Black, PieceType::King) => '♚',
        (Color::Black, PieceType::Queen) => '♛',
        (Color::Black, PieceType::Rook) => '♜',
        (Color::Black, PieceType::Bishop) => '♝',
        (Color::Black, PieceType::Knight) => '♞',
        (Color::Black, PieceType::Pawn) => '♟',
    }
}

/// A snapshot drawn from one side, with rank labels on the left and a file
/// legend below. Empty light squares are `.`, empty dark squares `:`.
pub struct BoardView<'a> {
    pub snapshot: &'a BoardSnapshot,
    pub perspective: Perspective,
}

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let files = self.perspective.files();
        for (rank, cells) in self.snapshot.rows(self.perspective) {
            write!(f, " {} ", rank + 1)?;
            for (&file, cell) in files.iter().zip(cells) {
                let c = match cell {
                    Some(p) => glyph(p),
                    None if (rank + file) % 2 == 0 => ':',
                    None => '.',
                };
                write!(f, "{c} ")?;
            }
            writeln!(f)?;
        }
        write!(f, "   ")?;
        for &file in files.iter() {
            write!(f, "{} ", (b'a' + file as u8) as char)?;
        }
        writeln!(f)
    }
}

pub fn render(snapshot: &BoardSnapshot, perspective: Perspective) -> String {
    BoardView { snapshot, perspective }.to_string()
}
