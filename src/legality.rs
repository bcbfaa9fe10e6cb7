use tracing::trace;

use crate::board::Board;
use crate::movegen::{generate_moves, LegalMoves};
use crate::moves::Move;
use crate::piece::{Color, PieceType};

/// True if, after `m` is played by `color`, some pseudo-legal reply of the
/// opponent lands on `color`'s king.
fn exposes_king(board: &Board, m: &Move, color: Color) -> bool {
    let mut next = board.clone();
    next.apply(m);
    let replies = generate_moves(&next, color.opposite());
    replies.values().flatten().any(|&to| {
        next.get(to)
            .is_some_and(|p| p.piece_type == PieceType::King && p.color == color)
    })
}

/// Drop every candidate that would leave `color`'s king capturable on the
/// next ply. The result is a fresh map; origins whose destinations are all
/// rejected stay in it with an empty list.
pub fn filter_by_king_safety(board: &Board, moves: &LegalMoves, color: Color) -> LegalMoves {
    moves
        .iter()
        .map(|(&from, dests)| {
            let kept = dests
                .iter()
                .copied()
                .filter(|&to| {
                    let m = Move::new(from, to);
                    let unsafe_move = exposes_king(board, &m, color);
                    if unsafe_move {
                        trace!(%m, ?color, "rejected: king left en prise");
                    }
                    !unsafe_move
                })
                .collect();
            (from, kept)
        })
        .collect()
}

/// Pseudo-legal generation followed by the king safety filter.
pub fn legal_moves(board: &Board, color: Color) -> LegalMoves {
    filter_by_king_safety(board, &generate_moves(board, color), color)
}
