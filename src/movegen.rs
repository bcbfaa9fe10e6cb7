// =============================================================================
// Pseudo-legal move generation
//
// Each piece kind maps to a movement rule via rule_for. Generation walks the board
// in scan order (rank 1 a..h, rank 2, ...) and asks the rule for every piece
// of the requested color. Destinations come out in a fixed order per kind and
// per direction; the search keeps the first of several equally scored moves,
// so this order decides which move gets played.
//
// King safety is not considered here, see legality.rs.
// =============================================================================

use std::collections::BTreeMap;

use crate::board::Board;
use crate::moves::{Move, Position};
use crate::piece::{Color, PieceType};

/// Destinations grouped by origin square. Origins iterate in scan order.
/// Every piece of the generating color has an entry, even with no moves.
pub type LegalMoves = BTreeMap<Position, Vec<Position>>;

/// Appends the destinations reachable by the piece on `from`.
type MoveRule = fn(&Board, Position, Color, &mut Vec<Position>);

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (2, 1), (2, -1), (-2, 1), (-2, -1),
    (1, 2), (-1, 2), (1, -2), (-1, -2),
];

const KING_OFFSETS: [(i32, i32); 8] = [
    (1, 0), (1, 1), (0, 1), (-1, 1),
    (-1, 0), (-1, -1), (0, -1), (1, -1),
];

const DIAGONALS: [(i32, i32); 4] = [(1, 1), (-1, -1), (1, -1), (-1, 1)];
const ORTHOGONALS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Dispatch table: the movement rule for each piece kind.
fn rule_for(piece_type: PieceType) -> MoveRule {
    match piece_type {
        PieceType::Pawn => pawn_moves,
        PieceType::Knight => knight_moves,
        PieceType::Bishop => bishop_moves,
        PieceType::Rook => rook_moves,
        PieceType::Queen => queen_moves,
        PieceType::King => king_moves,
    }
}

/// All pseudo-legal moves for `color`, grouped by origin.
pub fn generate_moves(board: &Board, color: Color) -> LegalMoves {
    let mut moves = LegalMoves::new();
    for (from, piece) in board.pieces() {
        if piece.color != color {
            continue;
        }
        let dests = moves.entry(from).or_default();
        rule_for(piece.piece_type)(board, from, color, dests);
    }
    moves
}

/// Flatten a move map into individual moves, preserving generation order.
pub fn iter_moves(moves: &LegalMoves) -> impl Iterator<Item = Move> + '_ {
    moves
        .iter()
        .flat_map(|(&from, dests)| dests.iter().map(move |&to| Move::new(from, to)))
}

pub fn move_count(moves: &LegalMoves) -> usize {
    moves.values().map(Vec::len).sum()
}

pub fn contains_move(moves: &LegalMoves, m: &Move) -> bool {
    moves.get(&m.from).is_some_and(|dests| dests.contains(&m.to))
}

fn is_empty(board: &Board, pos: Position) -> bool {
    board.get(pos).is_none()
}

/// Empty, or held by the other side.
fn can_land(board: &Board, pos: Position, color: Color) -> bool {
    board.get(pos).map_or(true, |p| p.color != color)
}

fn pawn_moves(board: &Board, from: Position, color: Color, dests: &mut Vec<Position>) {
    let dir = color.forward();

    // Single push
    if let Some(one) = from.offset(dir, 0) {
        if is_empty(board, one) {
            dests.push(one);
        }
    }

    // Double push from the starting rank, both squares must be clear
    if from.rank() as i32 == color.pawn_start_rank() {
        if let (Some(one), Some(two)) = (from.offset(dir, 0), from.offset(2 * dir, 0)) {
            if is_empty(board, one) && is_empty(board, two) {
                dests.push(two);
            }
        }
    }

    // Diagonal captures, towards file a first
    for df in [-1, 1] {
        if let Some(target) = from.offset(dir, df) {
            if board.get(target).is_some_and(|p| p.color != color) {
                dests.push(target);
            }
        }
    }
}

fn step_moves(
    board: &Board,
    from: Position,
    color: Color,
    offsets: &[(i32, i32)],
    dests: &mut Vec<Position>,
) {
    for &(dr, df) in offsets {
        if let Some(to) = from.offset(dr, df) {
            if can_land(board, to, color) {
                dests.push(to);
            }
        }
    }
}

fn sliding_moves(
    board: &Board,
    from: Position,
    color: Color,
    directions: &[(i32, i32)],
    dests: &mut Vec<Position>,
) {
    for &(dr, df) in directions {
        let mut cur = from;
        while let Some(to) = cur.offset(dr, df) {
            match board.get(to) {
                None => dests.push(to),
                Some(p) => {
                    if p.color != color {
                        dests.push(to);
                    }
                    break;
                }
            }
            cur = to;
        }
    }
}

fn knight_moves(board: &Board, from: Position, color: Color, dests: &mut Vec<Position>) {
    step_moves(board, from, color, &KNIGHT_OFFSETS, dests);
}

fn bishop_moves(board: &Board, from: Position, color: Color, dests: &mut Vec<Position>) {
    sliding_moves(board, from, color, &DIAGONALS, dests);
}

fn rook_moves(board: &Board, from: Position, color: Color, dests: &mut Vec<Position>) {
    sliding_moves(board, from, color, &ORTHOGONALS, dests);
}

fn queen_moves(board: &Board, from: Position, color: Color, dests: &mut Vec<Position>) {
    sliding_moves(board, from, color, &DIAGONALS, dests);
    sliding_moves(board, from, color, &ORTHOGONALS, dests);
}

fn king_moves(board: &Board, from: Position, color: Color, dests: &mut Vec<Position>) {
    step_moves(board, from, color, &KING_OFFSETS, dests);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Piece;

    fn pos(rank: i32, file: i32) -> Position {
        Position::new(rank, file).unwrap()
    }

    fn lone(piece_type: PieceType, color: Color, rank: i32, file: i32) -> Vec<Position> {
        let mut board = Board::empty();
        board.place(rank, file, Piece::new(piece_type, color)).unwrap();
        let moves = generate_moves(&board, color);
        assert_eq!(moves.len(), 1);
        moves[&pos(rank, file)].clone()
    }

    fn squares(list: &[(i32, i32)]) -> Vec<Position> {
        list.iter().map(|&(r, f)| pos(r, f)).collect()
    }

    #[test]
    fn lone_knight_on_b1() {
        assert_eq!(
            lone(PieceType::Knight, Color::White, 0, 1),
            squares(&[(2, 2), (2, 0), (1, 3)])
        );
    }

    #[test]
    fn lone_knight_in_centre_has_eight_moves_in_order() {
        assert_eq!(
            lone(PieceType::Knight, Color::Black, 3, 3),
            squares(&[(5, 4), (5, 2), (1, 4), (1, 2), (4, 5), (2, 5), (4, 1), (2, 1)])
        );
    }

    #[test]
    fn lone_king_on_corner_and_centre() {
        assert_eq!(
            lone(PieceType::King, Color::White, 0, 0),
            squares(&[(1, 0), (1, 1), (0, 1)])
        );
        assert_eq!(
            lone(PieceType::King, Color::White, 4, 4),
            squares(&[(5, 4), (5, 5), (4, 5), (3, 5), (3, 4), (3, 3), (4, 3), (5, 3)])
        );
    }

    #[test]
    fn lone_bishop_rays_in_direction_order() {
        assert_eq!(
            lone(PieceType::Bishop, Color::White, 2, 2),
            squares(&[
                (3, 3), (4, 4), (5, 5), (6, 6), (7, 7),
                (1, 1), (0, 0),
                (3, 1), (4, 0),
                (1, 3), (0, 4),
            ])
        );
    }

    #[test]
    fn lone_rook_on_a1() {
        assert_eq!(
            lone(PieceType::Rook, Color::White, 0, 0),
            squares(&[
                (1, 0), (2, 0), (3, 0), (4, 0), (5, 0), (6, 0), (7, 0),
                (0, 1), (0, 2), (0, 3), (0, 4), (0, 5), (0, 6), (0, 7),
            ])
        );
    }

    #[test]
    fn lone_queen_is_bishop_then_rook() {
        let queen = lone(PieceType::Queen, Color::Black, 3, 3);
        let mut expected = lone(PieceType::Bishop, Color::Black, 3, 3);
        expected.extend(lone(PieceType::Rook, Color::Black, 3, 3));
        assert_eq!(queen, expected);
        assert_eq!(queen.len(), 27);
    }

    #[test]
    fn pawns_push_one_or_two_from_start() {
        assert_eq!(lone(PieceType::Pawn, Color::White, 1, 4), squares(&[(2, 4), (3, 4)]));
        assert_eq!(lone(PieceType::Pawn, Color::Black, 6, 4), squares(&[(5, 4), (4, 4)]));
        assert_eq!(lone(PieceType::Pawn, Color::White, 2, 4), squares(&[(3, 4)]));
        // Last rank: nowhere to go, no promotion
        assert!(lone(PieceType::Pawn, Color::White, 7, 4).is_empty());
    }

    #[test]
    fn pawn_double_push_needs_both_squares_clear() {
        let mut board = Board::empty();
        board.place(1, 4, Piece::new(PieceType::Pawn, Color::White)).unwrap();
        board.place(3, 4, Piece::new(PieceType::Knight, Color::Black)).unwrap();
        assert_eq!(generate_moves(&board, Color::White)[&pos(1, 4)], squares(&[(2, 4)]));

        board.place(2, 4, Piece::new(PieceType::Knight, Color::Black)).unwrap();
        assert!(generate_moves(&board, Color::White)[&pos(1, 4)].is_empty());
    }

    #[test]
    fn pawn_captures_only_enemies_diagonally() {
        let mut board = Board::empty();
        board.place(3, 3, Piece::new(PieceType::Pawn, Color::White)).unwrap();
        board.place(4, 2, Piece::new(PieceType::Rook, Color::Black)).unwrap();
        board.place(4, 4, Piece::new(PieceType::Rook, Color::White)).unwrap();
        board.place(4, 3, Piece::new(PieceType::Bishop, Color::Black)).unwrap();
        assert_eq!(generate_moves(&board, Color::White)[&pos(3, 3)], squares(&[(4, 2)]));
    }

    #[test]
    fn sliders_stop_at_blockers() {
        let mut board = Board::empty();
        board.place(0, 0, Piece::new(PieceType::Rook, Color::White)).unwrap();
        board.place(2, 0, Piece::new(PieceType::Pawn, Color::Black)).unwrap();
        board.place(0, 2, Piece::new(PieceType::Pawn, Color::White)).unwrap();
        let moves = generate_moves(&board, Color::White);
        assert_eq!(moves[&pos(0, 0)], squares(&[(1, 0), (2, 0), (0, 1)]));
    }

    #[test]
    fn opening_position_has_twenty_moves_per_side() {
        let board = Board::new();
        for color in [Color::White, Color::Black] {
            let moves = generate_moves(&board, color);
            assert_eq!(moves.len(), 16, "every piece gets an entry");
            assert_eq!(move_count(&moves), 20);
        }
    }

    #[test]
    fn flattened_moves_follow_scan_order() {
        let board = Board::new();
        let moves = generate_moves(&board, Color::White);
        let first: Vec<String> = iter_moves(&moves).take(4).map(|m| m.to_notation()).collect();
        assert_eq!(first, ["B1-C3", "B1-A3", "G1-H3", "G1-F3"]);
        assert!(contains_move(&moves, &Move::parse("E2-E4").unwrap()));
        assert!(!contains_move(&moves, &Move::parse("E2-E5").unwrap()));
    }
}
