//! End-of-game majority.

use crate::{Board, Color, GameStatus};
use tracing::instrument;

/// Color with more discs on the board, or `None` on a tie.
pub fn majority(board: &Board) -> Option<Color> {
    let black = board.count(Color::Black);
    let white = board.count(Color::White);
    match black.cmp(&white) {
        std::cmp::Ordering::Greater => Some(Color::Black),
        std::cmp::Ordering::Less => Some(Color::White),
        std::cmp::Ordering::Equal => None,
    }
}

/// Terminal status for `board`, whether or not it is full.
#[instrument(skip(board), fields(discs = board.len()))]
pub fn end_status(board: &Board) -> GameStatus {
    majority(board).map_or(GameStatus::Drawn, GameStatus::Won)
}
