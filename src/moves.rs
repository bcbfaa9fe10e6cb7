use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChessError, Result};

/// A square on the board. Row 0 = rank 1, col 0 = file a.
///
/// Ordering is rank first, then file, so sorting positions reproduces the
/// row-by-row scan the move generator performs.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "RawPosition")]
pub struct Position {
    rank: u8,
    file: u8,
}

/// Unvalidated wire form; deserialized positions go through `Position::new`.
#[derive(Deserialize)]
struct RawPosition {
    rank: i32,
    file: i32,
}

impl TryFrom<RawPosition> for Position {
    type Error = ChessError;

    fn try_from(raw: RawPosition) -> Result<Position> {
        Position::new(raw.rank, raw.file)
    }
}

impl Position {
    pub fn new(rank: i32, file: i32) -> Result<Position> {
        if (0..8).contains(&rank) && (0..8).contains(&file) {
            Ok(Position { rank: rank as u8, file: file as u8 })
        } else {
            Err(ChessError::OutOfRange { rank, file })
        }
    }

    pub fn rank(self) -> usize {
        self.rank as usize
    }

    pub fn file(self) -> usize {
        self.file as usize
    }

    /// The square `(dr, df)` away, or `None` if that falls off the board.
    pub fn offset(self, dr: i32, df: i32) -> Option<Position> {
        Position::new(self.rank as i32 + dr, self.file as i32 + df).ok()
    }

    /// All 64 squares in scan order (rank 1 a..h, then rank 2, ...).
    pub fn all() -> impl Iterator<Item = Position> {
        (0..8u8).flat_map(|rank| (0..8u8).map(move |file| Position { rank, file }))
    }

    fn parse_pair(file: u8, rank: u8) -> Option<Position> {
        let file = match file {
            b'a'..=b'h' => file - b'a',
            b'A'..=b'H' => file - b'A',
            _ => return None,
        };
        let rank = match rank {
            b'1'..=b'8' => rank - b'1',
            _ => return None,
        };
        Some(Position { rank, file })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'A' + self.file) as char;
        let rank = (b'1' + self.rank) as char;
        write!(f, "{file}{rank}")
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Position,
    pub to: Position,
}

impl Move {
    pub fn new(from: Position, to: Position) -> Self {
        Move { from, to }
    }

    /// Parse `<file><rank>-<file><rank>`, e.g. "E2-E4". Files are
    /// case-insensitive; anything else, including surrounding whitespace,
    /// is rejected.
    pub fn parse(s: &str) -> Result<Move> {
        let malformed = || ChessError::MalformedNotation(s.to_string());
        let bytes = s.as_bytes();
        if bytes.len() != 5 || bytes[2] != b'-' {
            return Err(malformed());
        }
        let from = Position::parse_pair(bytes[0], bytes[1]).ok_or_else(malformed)?;
        let to = Position::parse_pair(bytes[3], bytes[4]).ok_or_else(malformed)?;
        Ok(Move { from, to })
    }

    /// Render in the notation `parse` accepts, with upper-case files.
    pub fn to_notation(&self) -> String {
        format!("{}-{}", self.from, self.to)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

impl FromStr for Move {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Move> {
        Move::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(rank: i32, file: i32) -> Position {
        Position::new(rank, file).unwrap()
    }

    #[test]
    fn parses_upper_and_lower_case() {
        let m = Move::parse("E2-E4").unwrap();
        assert_eq!(m.from, pos(1, 4));
        assert_eq!(m.to, pos(3, 4));
        assert_eq!(Move::parse("e2-e4").unwrap(), m);
        assert_eq!(Move::parse("a1-H8").unwrap(), Move::new(pos(0, 0), pos(7, 7)));
    }

    #[test]
    fn rejects_malformed_notation() {
        for bad in ["", "E2E4", "E2-E9", "I2-E4", "E0-E4", "E2-E4 ", " E2-E4", "E2:E4", "E2-E44", "é2-e4"] {
            assert!(
                matches!(Move::parse(bad), Err(ChessError::MalformedNotation(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn every_move_survives_format_then_parse() {
        for from in Position::all() {
            for to in Position::all() {
                let m = Move::new(from, to);
                assert_eq!(m.to_notation().parse::<Move>().unwrap(), m);
            }
        }
    }

    #[test]
    fn out_of_range_positions_are_errors() {
        assert_eq!(Position::new(8, 0), Err(ChessError::OutOfRange { rank: 8, file: 0 }));
        assert_eq!(Position::new(0, -1), Err(ChessError::OutOfRange { rank: 0, file: -1 }));
        assert_eq!(pos(0, 0).offset(-1, 0), None);
        assert_eq!(pos(0, 0).offset(2, 1), Some(pos(2, 1)));
    }

    #[test]
    fn deserializing_rejects_off_board_squares() {
        let err = serde_json::from_str::<Position>(r#"{"rank":9,"file":4}"#).unwrap_err();
        assert!(err.to_string().contains("out of range"), "{err}");

        let off_board = r#"{"from":{"rank":1,"file":4},"to":{"rank":9,"file":4}}"#;
        assert!(serde_json::from_str::<Move>(off_board).is_err());

        let m: Move = serde_json::from_str(r#"{"from":{"rank":1,"file":4},"to":{"rank":3,"file":4}}"#).unwrap();
        assert_eq!(m, Move::new(pos(1, 4), pos(3, 4)));
        assert_eq!(serde_json::to_string(&pos(3, 4)).unwrap(), r#"{"rank":3,"file":4}"#);
    }

    #[test]
    fn scan_order_matches_ord() {
        let squares: Vec<Position> = Position::all().collect();
        assert_eq!(squares.len(), 64);
        let mut sorted = squares.clone();
        sorted.sort();
        assert_eq!(squares, sorted);
        assert_eq!(squares[8], pos(1, 0));
    }
}
