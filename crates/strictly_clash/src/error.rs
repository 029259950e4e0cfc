//! Session errors.

use crate::NameError;
use crate::storage::StorageError;
use derive_more::{Display, From};
use strictly_reversi::GameError;

/// Failure of a [`Clash`](crate::Clash) operation.
#[derive(Debug, Clone, PartialEq, Eq, Display, From)]
pub enum ClashError {
    /// No game has been started or joined.
    #[display("Clash not started")]
    NotStarted,

    /// A remote move by the side that does not hold the turn.
    #[display("Not your turn")]
    OutOfTurn,

    /// The remote record no longer exists.
    #[display("Game not found")]
    GameNotFound,

    /// The stored game matches the local view.
    #[display("No changes")]
    NoChange,

    /// Operation that needs a remote session.
    #[display("Command unavailable on a local game")]
    UnsupportedOnLocal,

    /// Rejected record name.
    #[display("{}", _0)]
    #[from]
    InvalidName(NameError),

    /// Rejected by the rules.
    #[display("{}", _0)]
    #[from]
    Game(GameError),

    /// Backend failure.
    #[display("{}", _0)]
    #[from]
    Storage(StorageError),
}

impl std::error::Error for ClashError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClashError::InvalidName(e) => Some(e),
            ClashError::Game(e) => Some(e),
            ClashError::Storage(e) => Some(e),
            _ => None,
        }
    }
}
