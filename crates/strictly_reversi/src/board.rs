//! Board storage.

use crate::{BOARD_CELLS, BOARD_SIZE, Color, Position};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const EMPTY_CODE: char = '.';

/// Occupied cells of an 8x8 board. Absent positions are empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Board {
    cells: BTreeMap<Position, Color>,
}

/// Failure to decode a board string.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum BoardDecodeError {
    /// Wrong number of cells.
    #[display("Board encoding has {} cells, expected {}", _0, BOARD_CELLS)]
    Length(usize),
    /// Unknown cell code.
    #[display("Unknown cell code '{}'", _0)]
    Code(char),
}

impl std::error::Error for BoardDecodeError {}

impl Board {
    /// Creates an empty board.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates the standard opening: two discs of each color crossed in the
    /// 2x2 centre, black on `4E` and `5D`, white on `4D` and `5E`.
    pub fn initial() -> Self {
        let mid = BOARD_SIZE / 2;
        let at = |row: usize, col: usize| Position::new((row - 1) * BOARD_SIZE + col);
        [
            (at(mid, mid), Color::Black),
            (at(mid + 1, mid - 1), Color::Black),
            (at(mid + 1, mid), Color::White),
            (at(mid, mid - 1), Color::White),
        ]
        .into_iter()
        .collect()
    }

    /// Color at `pos`, if occupied.
    pub fn get(&self, pos: Position) -> Option<Color> {
        self.cells.get(&pos).copied()
    }

    /// Checks if a cell is empty.
    pub fn is_empty_at(&self, pos: Position) -> bool {
        !self.cells.contains_key(&pos)
    }

    /// Returns a copy with `pos` set to `color`.
    pub fn with(&self, pos: Position, color: Color) -> Self {
        let mut next = self.clone();
        next.cells.insert(pos, color);
        next
    }

    /// Returns a copy with `pos` emptied.
    pub fn without(&self, pos: Position) -> Self {
        let mut next = self.clone();
        next.cells.remove(&pos);
        next
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when no cell is occupied.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True when every cell is occupied.
    pub fn is_full(&self) -> bool {
        self.cells.len() == BOARD_CELLS
    }

    /// Number of discs of `color`.
    pub fn count(&self, color: Color) -> usize {
        self.cells.values().filter(|c| **c == color).count()
    }

    /// Occupied cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Color)> + '_ {
        self.cells.iter().map(|(p, c)| (*p, *c))
    }
}

impl FromIterator<(Position, Color)> for Board {
    fn from_iter<I: IntoIterator<Item = (Position, Color)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl From<Board> for String {
    fn from(board: Board) -> Self {
        Position::all()
            .map(|pos| board.get(pos).map_or(EMPTY_CODE, Color::code))
            .collect()
    }
}

impl TryFrom<String> for Board {
    type Error = BoardDecodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let codes: Vec<char> = value.chars().collect();
        if codes.len() != BOARD_CELLS {
            return Err(BoardDecodeError::Length(codes.len()));
        }
        let mut cells = BTreeMap::new();
        for (pos, code) in Position::all().zip(codes) {
            if code == EMPTY_CODE {
                continue;
            }
            let color = Color::from_code(code).ok_or(BoardDecodeError::Code(code))?;
            cells.insert(pos, color);
        }
        Ok(Self { cells })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_board_has_center_square() {
        let board = Board::initial();
        assert_eq!(board.len(), 4);
        assert_eq!(board.count(Color::Black), 2);
        assert_eq!(board.count(Color::White), 2);
        assert_eq!(board.get("4E".parse().unwrap()), Some(Color::Black));
        assert_eq!(board.get("5D".parse().unwrap()), Some(Color::Black));
        assert_eq!(board.get("4D".parse().unwrap()), Some(Color::White));
        assert_eq!(board.get("5E".parse().unwrap()), Some(Color::White));
    }

    #[test]
    fn test_initial_board_is_deterministic() {
        assert_eq!(Board::initial(), Board::initial());
    }

    #[test]
    fn test_with_does_not_touch_original() {
        let board = Board::initial();
        let next = board.with(Position::new(0), Color::White);
        assert_eq!(board.len(), 4);
        assert_eq!(next.len(), 5);
        assert_eq!(next.without(Position::new(0)), board);
    }

    #[test]
    fn test_string_encoding() {
        let encoded = String::from(Board::initial());
        assert_eq!(encoded.len(), BOARD_CELLS);
        assert_eq!(&encoded[24..32], "...WB...");
        assert_eq!(Board::try_from(encoded), Ok(Board::initial()));
    }

    #[test]
    fn test_decode_rejects_bad_input() {
        assert_eq!(
            Board::try_from("B".to_string()),
            Err(BoardDecodeError::Length(1))
        );
        let bad = "X".repeat(BOARD_CELLS);
        assert_eq!(Board::try_from(bad), Err(BoardDecodeError::Code('X')));
    }
}
