//! Errors raised by the game state machine.

use crate::Position;

/// Failure to apply `play` or `pass` to a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum GameError {
    /// The position is not a legal move for the side to move.
    #[display("Invalid move {}", _0)]
    IllegalMove(Position),

    /// Passing while a legal move exists.
    #[display("There are possible moves for you to make")]
    MovesAvailable,

    /// The game is already over.
    #[display("Game has ended")]
    GameEnded,
}

impl std::error::Error for GameError {}
