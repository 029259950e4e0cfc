//! Core domain types for Reversi.

use serde::{Deserialize, Serialize};

/// Disc color, which doubles as the identity of a side.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Color {
    /// Black discs.
    Black,
    /// White discs.
    White,
}

impl Color {
    /// Returns the opposing color.
    pub fn other(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Single-character code used by the board encoding.
    pub fn code(self) -> char {
        match self {
            Color::Black => 'B',
            Color::White => 'W',
        }
    }

    /// Parses a board-encoding character.
    pub fn from_code(c: char) -> Option<Self> {
        match c {
            'B' => Some(Color::Black),
            'W' => Some(Color::White),
            _ => None,
        }
    }
}

/// Status of a game.
///
/// `Active` and `Passed` both name the color to move, but they are distinct
/// variants: `Passed` records that the opponent was just forced to pass, so a
/// second pass from this state ends the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// `turn` is to move after an ordinary move.
    Active(Color),
    /// `turn` is to move right after the opponent passed.
    Passed(Color),
    /// Game over with a winner.
    Won(Color),
    /// Game over with equal disc counts.
    Drawn,
}

impl GameStatus {
    /// Color to move, or `None` once the game is over.
    pub fn turn(&self) -> Option<Color> {
        match self {
            GameStatus::Active(c) | GameStatus::Passed(c) => Some(*c),
            GameStatus::Won(_) | GameStatus::Drawn => None,
        }
    }

    /// True for `Won` and `Drawn`.
    pub fn is_terminal(&self) -> bool {
        self.turn().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_is_involution() {
        for c in [Color::Black, Color::White] {
            assert_ne!(c.other(), c);
            assert_eq!(c.other().other(), c);
        }
    }

    #[test]
    fn test_active_and_passed_differ() {
        assert_ne!(GameStatus::Active(Color::Black), GameStatus::Passed(Color::Black));
        assert_eq!(GameStatus::Passed(Color::White), GameStatus::Passed(Color::White));
    }

    #[test]
    fn test_color_parses_case_insensitive() {
        assert_eq!("white".parse::<Color>(), Ok(Color::White));
        assert_eq!("BLACK".parse::<Color>(), Ok(Color::Black));
        assert_eq!(Color::White.to_string(), "WHITE");
    }
}
