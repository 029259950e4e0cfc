//! Strictly Clash - Reversi play sessions.
//!
//! A session ("clash") wraps a [`strictly_reversi::Game`] with the side of
//! the participant driving it, and either keeps the game in memory (local
//! play) or shares it with an opponent through a [`Storage`] backend (remote
//! play).
//!
//! # Architecture
//!
//! - **Clash**: immutable session values; `play`, `pass`, `targets`,
//!   `refresh`, `finish`
//! - **Storage**: named-record CRUD with memory, file and SQLite backends
//! - **AutoRefresh**: cancellable polling of a remote game
//! - **Config**: TOML configuration for the `reversi` binary
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use strictly_clash::{Clash, ClashError, GameStorage, MemoryStorage, Name};
//! use strictly_reversi::{Color, Game};
//!
//! # fn main() -> Result<(), ClashError> {
//! let storage: GameStorage = Arc::new(MemoryStorage::<Name, Game>::new());
//! let black = Clash::new(storage.clone()).new_game(Some(Name::new("g1")?), Color::Black)?;
//! let white = Clash::new(storage).join(Name::new("g1")?)?;
//!
//! let black = black.play("4C".parse().unwrap())?;
//! let white = white.refresh()?;
//! assert_eq!(white.game(), black.game());
//! assert!(white.new_available());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod clash;
mod codec;
mod config;
mod error;
mod name;
mod player;
mod poll;
mod storage;

pub use clash::{Clash, ClashState};
pub use codec::GameSerializer;
pub use config::{ClashConfig, ConfigError, StorageBackend};
pub use error::ClashError;
pub use name::{Name, NameError};
pub use player::Side;
pub use poll::{AutoRefresh, CancelHandle, RefreshEvent, RefreshOutcome, StopReason};
#[cfg(feature = "sqlite")]
pub use storage::SqliteStorage;
pub use storage::{
    FileStorage, GameStorage, MemoryStorage, Serializer, Storage, StorageError, StorageErrorKind,
};
