use serde::Serialize;

use crate::piece::{Color, Piece};

/// A read-only copy of a board, handed to renderers.
///
/// Owning its own grid means nothing a renderer does can reach back into
/// the live game.
#[derive(Clone, Serialize, Debug, PartialEq, Eq)]
pub struct BoardSnapshot {
    squares: [[Option<Piece>; 8]; 8],
    pub side_to_move: Color,
}

/// Which side sits at the bottom of the rendered board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Perspective {
    White,
    Black,
}

impl From<Color> for Perspective {
    fn from(c: Color) -> Self {
        match c {
            Color::White => Perspective::White,
            Color::Black => Perspective::Black,
        }
    }
}

impl Perspective {
    /// Row indices top to bottom as they should be drawn.
    pub fn ranks(self) -> [usize; 8] {
        match self {
            Perspective::White => [7, 6, 5, 4, 3, 2, 1, 0],
            Perspective::Black => [0, 1, 2, 3, 4, 5, 6, 7],
        }
    }

    /// Column indices left to right as they should be drawn.
    pub fn files(self) -> [usize; 8] {
        match self {
            Perspective::White => [0, 1, 2, 3, 4, 5, 6, 7],
            Perspective::Black => [7, 6, 5, 4, 3, 2, 1, 0],
        }
    }
}

impl BoardSnapshot {
    pub(crate) fn new(squares: [[Option<Piece>; 8]; 8], side_to_move: Color) -> Self {
        BoardSnapshot { squares, side_to_move }
    }

    pub fn at(&self, rank: usize, file: usize) -> Option<Piece> {
        self.squares.get(rank).and_then(|row| row.get(file)).copied().flatten()
    }

    /// Cells grouped into display rows for the given perspective. Each row
    /// carries its rank index so the renderer can label it.
    pub fn rows(&self, perspective: Perspective) -> Vec<(usize, Vec<Option<Piece>>)> {
        perspective
            .ranks()
            .iter()
            .map(|&r| {
                let cells = perspective.files().iter().map(|&c| self.squares[r][c]).collect();
                (r, cells)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::piece::PieceType;

    #[test]
    fn white_perspective_puts_black_back_rank_on_top() {
        let snap = Board::new().snapshot(Color::White);
        let rows = snap.rows(Perspective::White);
        assert_eq!(rows[0].0, 7);
        assert_eq!(rows[0].1[0], Some(Piece::new(PieceType::Rook, Color::Black)));
        assert_eq!(rows[0].1[3], Some(Piece::new(PieceType::Queen, Color::Black)));
        assert_eq!(rows[7].0, 0);
    }

    #[test]
    fn black_perspective_mirrors_files() {
        let snap = Board::new().snapshot(Color::Black);
        let rows = snap.rows(Perspective::Black);
        assert_eq!(rows[0].0, 0);
        // h1 is drawn first, the white king (e1) lands in the fourth column
        assert_eq!(rows[0].1[3], Some(Piece::new(PieceType::King, Color::White)));
        assert_eq!(snap.side_to_move, Color::Black);
    }

    #[test]
    fn snapshot_is_detached_from_board() {
        let mut board = Board::new();
        let snap = board.snapshot(Color::White);
        board.set(crate::moves::Position::new(1, 4).unwrap(), None);
        assert_eq!(snap.at(1, 4), Some(Piece::new(PieceType::Pawn, Color::White)));
        assert_eq!(snap.at(9, 9), None);
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let json = serde_json::to_value(Board::empty().snapshot(Color::White)).unwrap();
        assert_eq!(json["side_to_move"], "White");
        assert_eq!(json["squares"].as_array().map(|a| a.len()), Some(8));
    }
}
