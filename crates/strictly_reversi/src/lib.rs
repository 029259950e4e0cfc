//! Strictly Reversi - pure Reversi (Othello) rules.
//!
//! # Architecture
//!
//! - **Position / Board**: 8x8 addressing and disc storage
//! - **Rules**: legality, captures and the end-of-game majority
//! - **Game**: immutable state machine with `play` and `pass`
//!
//! # Example
//!
//! ```
//! use strictly_reversi::{Color, Game, GameStatus, Position};
//!
//! let game = Game::new(Color::Black);
//! let pos: Position = "4C".parse().unwrap();
//! let next = game.play(pos).unwrap();
//! assert_eq!(next.status(), GameStatus::Active(Color::White));
//! assert_eq!(next.board().count(Color::Black), 4);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod error;
mod game;
mod position;
pub mod rules;
mod types;

pub use board::{Board, BoardDecodeError};
pub use error::GameError;
pub use game::Game;
pub use position::{BOARD_CELLS, BOARD_SIZE, Position, PositionError};
pub use types::{Color, GameStatus};
