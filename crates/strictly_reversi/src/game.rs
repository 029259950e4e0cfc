//! The game state machine.
//!
//! A [`Game`] is an immutable value. [`Game::play`] and [`Game::pass`] are the
//! only transitions; both take `&self` and return a new game or a
//! [`GameError`], leaving the original untouched.

use crate::rules::{self, captures};
use crate::{Board, Color, GameError, GameStatus, Position};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, instrument};

/// A game of Reversi.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    /// Color of the side that created the game.
    owner: Color,
    /// Disc placement.
    board: Board,
    /// Whose turn it is, or how the game ended.
    status: GameStatus,
}

impl Game {
    /// Creates a game on the opening board with `owner` to move.
    #[instrument]
    pub fn new(owner: Color) -> Self {
        Self {
            owner,
            board: Board::initial(),
            status: GameStatus::Active(owner),
        }
    }

    /// Assembles a game from its parts, e.g. to resume a stored position.
    pub fn from_parts(owner: Color, board: Board, status: GameStatus) -> Self {
        Self {
            owner,
            board,
            status,
        }
    }

    /// Returns the owner color.
    pub fn owner(&self) -> Color {
        self.owner
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Color to move, or `None` once the game is over.
    pub fn turn(&self) -> Option<Color> {
        self.status.turn()
    }

    /// True once the game is won or drawn.
    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    /// Legal moves for the side to move. Empty once the game is over.
    pub fn valid_moves(&self) -> BTreeSet<Position> {
        self.turn()
            .map(|turn| rules::valid_moves(&self.board, turn))
            .unwrap_or_default()
    }

    /// Places a disc for the side to move and flips the captured discs.
    ///
    /// The game ends as soon as the board is full.
    ///
    /// # Errors
    ///
    /// - [`GameError::GameEnded`] if the game is over.
    /// - [`GameError::IllegalMove`] if `pos` captures nothing.
    #[instrument(skip(self), fields(status = ?self.status))]
    pub fn play(&self, pos: Position) -> Result<Game, GameError> {
        let turn = self.turn().ok_or(GameError::GameEnded)?;

        let flips = captures(&self.board, turn, pos);
        if flips.is_empty() {
            debug!(%pos, ?turn, "Rejected illegal move");
            return Err(GameError::IllegalMove(pos));
        }

        let board = flips
            .iter()
            .fold(self.board.with(pos, turn), |board, flipped| board.with(*flipped, turn));

        let status = if board.is_full() {
            rules::end_status(&board)
        } else {
            GameStatus::Active(turn.other())
        };

        debug!(%pos, ?turn, flipped = flips.len(), ?status, "Move applied");
        Ok(Game {
            owner: self.owner,
            board,
            status,
        })
    }

    /// Gives up the turn when the side to move has no legal move.
    ///
    /// A pass right after the opponent's pass ends the game on the current
    /// disc majority, even if empty cells remain.
    ///
    /// # Errors
    ///
    /// - [`GameError::GameEnded`] if the game is over.
    /// - [`GameError::MovesAvailable`] if the side to move can still play.
    #[instrument(skip(self), fields(status = ?self.status))]
    pub fn pass(&self) -> Result<Game, GameError> {
        let turn = self.turn().ok_or(GameError::GameEnded)?;

        if !rules::valid_moves(&self.board, turn).is_empty() {
            return Err(GameError::MovesAvailable);
        }

        let status = match self.status {
            GameStatus::Passed(_) => rules::end_status(&self.board),
            _ => GameStatus::Passed(turn.other()),
        };

        debug!(?turn, ?status, "Turn passed");
        Ok(Game {
            owner: self.owner,
            board: self.board.clone(),
            status,
        })
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Color::Black)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game() {
        let game = Game::new(Color::White);
        assert_eq!(game.owner(), Color::White);
        assert_eq!(game.status(), GameStatus::Active(Color::White));
        assert_eq!(game.board(), &Board::initial());
    }

    #[test]
    fn test_play_leaves_original_untouched() {
        let game = Game::default();
        let next = game.play("4C".parse().unwrap()).expect("legal move");
        assert_eq!(game, Game::default());
        assert_ne!(next, game);
    }

    #[test]
    fn test_play_on_occupied_cell_is_illegal() {
        let pos: Position = "4D".parse().unwrap();
        assert_eq!(Game::default().play(pos), Err(GameError::IllegalMove(pos)));
    }

    #[test]
    fn test_terminal_game_rejects_everything() {
        let game = Game::from_parts(Color::Black, Board::initial(), GameStatus::Drawn);
        assert_eq!(game.play("4C".parse().unwrap()), Err(GameError::GameEnded));
        assert_eq!(game.pass(), Err(GameError::GameEnded));
        assert!(game.valid_moves().is_empty());
    }
}
