//! Board coordinates.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Number of rows and columns on the board.
pub const BOARD_SIZE: usize = 8;

/// Number of cells on the board.
pub const BOARD_CELLS: usize = BOARD_SIZE * BOARD_SIZE;

/// A cell on the board, stored as a row-major index in `[0, BOARD_CELLS)`.
///
/// Rows are numbered from 1 and columns are lettered from `A`, so index 0 is
/// `1A` and index 63 is `8H`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Position(u8);

/// Failure to parse a position from text.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Invalid position '{}'", input)]
pub struct PositionError {
    input: String,
}

impl Position {
    /// Creates a position from a board index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is outside the board. Callers holding untrusted
    /// input should use [`Position::try_new`].
    pub fn new(index: usize) -> Self {
        match Self::try_new(index) {
            Some(pos) => pos,
            None => panic!("position index {index} outside 0..{BOARD_CELLS}"),
        }
    }

    /// Creates a position if `index` is on the board.
    pub fn try_new(index: usize) -> Option<Self> {
        (index < BOARD_CELLS).then(|| Self(index as u8))
    }

    /// Creates a position from a 1-based row and a column letter.
    pub fn from_coords(row: usize, column: char) -> Option<Self> {
        let column = column.to_ascii_uppercase();
        if !(1..=BOARD_SIZE).contains(&row) || !column.is_ascii_uppercase() {
            return None;
        }
        let col = (column as u8 - b'A') as usize;
        if col >= BOARD_SIZE {
            return None;
        }
        Self::try_new((row - 1) * BOARD_SIZE + col)
    }

    /// Row-major board index.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// 1-based row number.
    pub fn row(self) -> usize {
        self.index() / BOARD_SIZE + 1
    }

    /// Column letter, `A` through `H`.
    pub fn column(self) -> char {
        (b'A' + (self.index() % BOARD_SIZE) as u8) as char
    }

    /// Steps `(d_row, d_col)` away, or `None` when that leaves the board.
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Self> {
        let size = BOARD_SIZE as isize;
        let row = (self.index() / BOARD_SIZE) as isize + d_row;
        let col = (self.index() % BOARD_SIZE) as isize + d_col;
        if (0..size).contains(&row) && (0..size).contains(&col) {
            Self::try_new((row * size + col) as usize)
        } else {
            None
        }
    }

    /// Every position in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_CELLS as u8).map(Position)
    }
}

impl TryFrom<u8> for Position {
    type Error = PositionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_new(value as usize).ok_or_else(|| PositionError {
            input: value.to_string(),
        })
    }
}

impl From<Position> for u8 {
    fn from(pos: Position) -> Self {
        pos.0
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.row(), self.column())
    }
}

impl FromStr for Position {
    type Err = PositionError;

    /// Accepts `4C`, `c4` and similar, in either order.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || PositionError {
            input: s.to_string(),
        };
        let trimmed = s.trim();
        let letters: Vec<char> = trimmed.chars().filter(|c| c.is_ascii_alphabetic()).collect();
        let digits: String = trimmed.chars().filter(|c| c.is_ascii_digit()).collect();
        if letters.len() != 1 || digits.is_empty() || letters.len() + digits.len() != trimmed.len() {
            return Err(err());
        }
        let row: usize = digits.parse().map_err(|_| err())?;
        Self::from_coords(row, letters[0]).ok_or_else(err)
    }
}
