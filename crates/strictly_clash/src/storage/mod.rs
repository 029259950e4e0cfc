//! The storage contract and its backends.
//!
//! Sessions only ever talk to [`Storage`]. Each call is a single blocking
//! round trip; atomicity of an individual call is the backend's job.

mod error;
mod file;
mod memory;
#[cfg(feature = "sqlite")]
mod sqlite;

pub use error::{StorageError, StorageErrorKind};
pub use file::FileStorage;
pub use memory::MemoryStorage;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStorage;

use crate::Name;
use std::sync::Arc;
use strictly_reversi::Game;

/// Named-record CRUD.
pub trait Storage<K, T>: std::fmt::Debug + Send + Sync {
    /// Stores a new record.
    ///
    /// # Errors
    ///
    /// [`StorageErrorKind::AlreadyExists`] if `key` already has a record.
    fn create(&self, key: &K, value: &T) -> Result<(), StorageError>;

    /// Loads a record, `None` if there is none.
    fn read(&self, key: &K) -> Result<Option<T>, StorageError>;

    /// Replaces an existing record.
    ///
    /// # Errors
    ///
    /// [`StorageErrorKind::NotFound`] if `key` has no record.
    fn update(&self, key: &K, value: &T) -> Result<(), StorageError>;

    /// Removes an existing record.
    ///
    /// # Errors
    ///
    /// [`StorageErrorKind::NotFound`] if `key` has no record.
    fn delete(&self, key: &K) -> Result<(), StorageError>;
}

/// Text codec used by backends that persist records as strings.
pub trait Serializer<T>: std::fmt::Debug + Send + Sync {
    /// Encodes a record.
    fn serialize(&self, value: &T) -> Result<String, StorageError>;

    /// Decodes a record.
    fn deserialize(&self, text: &str) -> Result<T, StorageError>;
}

/// Shared handle to the store of games.
pub type GameStorage = Arc<dyn Storage<Name, Game>>;
