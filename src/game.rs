use tracing::info;

use crate::board::Board;
use crate::engine::{pick_move, PickResult, SearchConfig};
use crate::error::{ChessError, Result};
use crate::legality::legal_moves;
use crate::movegen::contains_move;
use crate::moves::Move;
use crate::piece::Color;
use crate::snapshot::BoardSnapshot;

/// How a human-vs-engine session is set up.
#[derive(Clone, Debug)]
pub struct GameConfig {
    /// The side typing moves. The engine plays the other one.
    pub human: Color,
    pub search: SearchConfig,
    /// Reject human moves that are not legal for the human's side. Off by
    /// default: the console game has always applied whatever parses.
    pub strict: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            human: Color::White,
            search: SearchConfig::default(),
            strict: false,
        }
    }
}

/// A move that was played, and by whom.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayedMove {
    pub color: Color,
    pub mv: Move,
}

/// One human-vs-engine game: the live board plus whose turn it is.
pub struct Game {
    board: Board,
    config: GameConfig,
    to_move: Color,
    history: Vec<PlayedMove>,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Self::from_board(Board::new(), Color::White, config)
    }

    /// Resume from an arbitrary position.
    pub fn from_board(board: Board, to_move: Color, config: GameConfig) -> Self {
        Game {
            board,
            config,
            to_move,
            history: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn to_move(&self) -> Color {
        self.to_move
    }

    pub fn history(&self) -> &[PlayedMove] {
        &self.history
    }

    pub fn is_human_turn(&self) -> bool {
        self.to_move == self.config.human
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        self.board.snapshot(self.to_move)
    }

    fn record(&mut self, mv: Move) {
        info!(color = ?self.to_move, %mv, score = self.board.evaluate(), "move applied");
        self.history.push(PlayedMove { color: self.to_move, mv });
        self.to_move = self.to_move.opposite();
    }

    /// Apply a move typed by the human. Malformed input (and, in strict
    /// mode, an illegal move) leaves the game exactly as it was.
    pub fn play_human(&mut self, notation: &str) -> Result<Move> {
        let mv = Move::parse(notation)?;
        if self.config.strict && !contains_move(&legal_moves(&self.board, self.to_move), &mv) {
            return Err(ChessError::IllegalMove(mv));
        }
        self.board.apply(&mv);
        self.record(mv);
        Ok(mv)
    }

    /// Let the engine choose and play a move for the side to move. The
    /// engine always looks at least one ply ahead.
    pub fn play_engine(&mut self) -> Result<PickResult> {
        let search = SearchConfig {
            depth: self.config.search.depth.max(1),
        };
        let pick = pick_move(&self.board, self.to_move, &search)
            .ok_or(ChessError::NoLegalMoves(self.to_move))?;
        self.board.apply(&pick.mv);
        self.record(pick.mv);
        Ok(pick)
    }
}
