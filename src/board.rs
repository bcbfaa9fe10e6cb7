use tracing::trace;

use crate::error::Result;
use crate::moves::{Move, Position};
use crate::piece::{Color, Piece, PieceType};
use crate::snapshot::BoardSnapshot;

/// One game position: an 8x8 grid of optional pieces, row 0 = rank 1.
///
/// The board knows nothing about whose turn it is or which moves are legal.
/// It only stores pieces and relocates them when asked. `Clone` is a plain
/// copy of the grid, so speculative search can mutate clones freely.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

impl Board {
    /// Create an empty board with no pieces. Useful for setting up test positions.
    pub fn empty() -> Self {
        Board { squares: [[None; 8]; 8] }
    }

    /// The standard starting position.
    pub fn new() -> Self {
        let mut squares = [[None; 8]; 8];

        // White pieces (rows 0-1)
        for (col, &pt) in BACK_RANK.iter().enumerate() {
            squares[0][col] = Some(Piece::new(pt, Color::White));
        }
        for sq in &mut squares[1] {
            *sq = Some(Piece::new(PieceType::Pawn, Color::White));
        }

        // Black pieces (rows 6-7)
        for sq in &mut squares[6] {
            *sq = Some(Piece::new(PieceType::Pawn, Color::Black));
        }
        for (col, &pt) in BACK_RANK.iter().enumerate() {
            squares[7][col] = Some(Piece::new(pt, Color::Black));
        }

        Board { squares }
    }

    pub fn get(&self, pos: Position) -> Option<Piece> {
        self.squares[pos.rank()][pos.file()]
    }

    pub fn set(&mut self, pos: Position, piece: Option<Piece>) {
        self.squares[pos.rank()][pos.file()] = piece;
    }

    /// Place a piece by raw coordinates, rejecting anything off the board.
    pub fn place(&mut self, rank: i32, file: i32, piece: Piece) -> Result<()> {
        let pos = Position::new(rank, file)?;
        self.set(pos, Some(piece));
        Ok(())
    }

    /// Iterate over occupied squares in scan order.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all().filter_map(move |pos| self.get(pos).map(|p| (pos, p)))
    }

    pub fn find_king(&self, color: Color) -> Option<Position> {
        self.pieces()
            .find(|(_, p)| p.piece_type == PieceType::King && p.color == color)
            .map(|(pos, _)| pos)
    }

    /// Move whatever stands on `from` to `to`, overwriting any occupant of
    /// `to` and emptying `from`. No legality check is done here; an empty
    /// `from` simply empties `to`. Returns the captured piece, if any.
    pub fn apply(&mut self, m: &Move) -> Option<Piece> {
        let moving = self.get(m.from);
        let captured = self.get(m.to);
        self.set(m.to, moving);
        self.set(m.from, None);
        if let Some(c) = captured {
            trace!(%m, captured = ?c.piece_type, "capture");
        }
        captured
    }

    /// Parse `notation` and apply it. On a parse error the board is left
    /// untouched. `_color` is the side on whose behalf the move is made; the
    /// board itself does not enforce turn order.
    pub fn apply_notation(&mut self, notation: &str, _color: Color) -> Result<Move> {
        let m = Move::parse(notation)?;
        self.apply(&m);
        Ok(m)
    }

    /// Material balance: sum of signed piece values, White positive.
    pub fn evaluate(&self) -> i32 {
        self.pieces().map(|(_, p)| p.signed_value()).sum()
    }

    /// Read-only copy of the grid for renderers. This is the board's only
    /// serialized form.
    pub fn snapshot(&self, side_to_move: Color) -> BoardSnapshot {
        BoardSnapshot::new(self.squares, side_to_move)
    }
}
