// =============================================================================
// Chess AI Engine
//
// Plain fixed-depth minimax over material. No pruning, no move ordering, no
// transposition table: every node regenerates legal moves from scratch and
// explores every child on its own clone of the board.
//
// Scores are always from White's perspective (positive = good for White).
// White maximizes, Black minimizes. Checkmate is never detected; losing the
// king costs 1000 points, which is what steers the search away from it.
//
// Coordinate system: row 0 = rank 1, col 0 = file a.
// =============================================================================

use tracing::debug;

use crate::board::Board;
use crate::legality::legal_moves;
use crate::movegen::iter_moves;
use crate::moves::Move;
use crate::piece::Color;

// =============================================================================
// Configuration
// =============================================================================

/// Search depth in plies. The console game has always searched 3 plies.
pub const DEFAULT_DEPTH: u32 = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies to look ahead. 0 just evaluates the current position.
    pub depth: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig { depth: DEFAULT_DEPTH }
    }
}

// =============================================================================
// Results
// =============================================================================

/// Outcome of one search node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    /// Minimax score from White's perspective.
    pub score: i32,
    /// `None` at depth 0, and when the side to move had no legal move at
    /// all. In the latter case `score` is 0, not an evaluation.
    pub best_move: Option<Move>,
    /// Number of leaf positions evaluated below this node.
    pub nodes: u64,
}

/// The move chosen for a side, with the bookkeeping the drivers print.
#[derive(Clone, Debug)]
pub struct PickResult {
    pub mv: Move,
    pub score: i32,
    pub nodes: u64,
}

// =============================================================================
// Search
// =============================================================================

/// Strictly better for `color`: higher for White, lower for Black.
fn improves(color: Color, candidate: i32, incumbent: i32) -> bool {
    candidate * color.sign() > incumbent * color.sign()
}

fn minimax(depth: u32, board: &Board, color: Color, nodes: &mut u64) -> (i32, Option<Move>) {
    if depth == 0 {
        *nodes += 1;
        return (board.evaluate(), None);
    }

    let moves = legal_moves(board, color);
    let mut best: Option<(i32, Move)> = None;

    for mv in iter_moves(&moves) {
        let mut clone = board.clone();
        clone.apply(&mv);
        let (score, _) = minimax(depth - 1, &clone, color.opposite(), nodes);

        // Ties keep the move found first in generation order
        match best {
            Some((incumbent, _)) if !improves(color, score, incumbent) => {}
            _ => best = Some((score, mv)),
        }
    }

    match best {
        Some((score, mv)) => (score, Some(mv)),
        None => (0, None),
    }
}

/// Minimax `depth` plies deep with `color` to move.
///
/// The board is only read; every candidate is tried on its own clone.
pub fn search(depth: u32, board: &Board, color: Color) -> SearchResult {
    let mut nodes = 0;
    let (score, best_move) = minimax(depth, board, color, &mut nodes);
    SearchResult { score, best_move, nodes }
}

/// Pick the move `color` should play. Returns `None` when there is nothing
/// legal to play (or the configured depth is 0).
pub fn pick_move(board: &Board, color: Color, config: &SearchConfig) -> Option<PickResult> {
    let result = search(config.depth, board, color);
    debug!(
        ?color,
        depth = config.depth,
        nodes = result.nodes,
        score = result.score,
        best = ?result.best_move.map(|m| m.to_notation()),
        "search finished"
    );
    result.best_move.map(|mv| PickResult {
        mv,
        score: result.score,
        nodes: result.nodes,
    })
}
