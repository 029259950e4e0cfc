//! Storage error types.

use derive_more::Display;
use tracing::instrument;

/// What went wrong in a storage call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum StorageErrorKind {
    /// `create` on a key that already has a record.
    #[display("already exists")]
    AlreadyExists,
    /// `update` or `delete` on a key without a record.
    #[display("not found")]
    NotFound,
    /// Filesystem failure.
    #[display("io")]
    Io,
    /// A record could not be encoded or decoded.
    #[display("codec")]
    Codec,
    /// Database or other backend failure.
    #[display("backend")]
    Backend,
}

/// Storage error with location tracking.
#[derive(Debug, Clone, PartialEq, Eq, Display, derive_more::Error)]
#[display("Storage error ({}): {} at {}:{}", kind, message, file, line)]
pub struct StorageError {
    /// Error category.
    pub kind: StorageErrorKind,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StorageError {
    /// Creates a new storage error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(kind: StorageErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// `create` hit an existing record.
    #[track_caller]
    pub fn already_exists(key: impl std::fmt::Display) -> Self {
        Self::new(StorageErrorKind::AlreadyExists, format!("Record {} already exists", key))
    }

    /// `update`/`delete` found no record.
    #[track_caller]
    pub fn not_found(key: impl std::fmt::Display) -> Self {
        Self::new(StorageErrorKind::NotFound, format!("Record {} does not exist", key))
    }
}

impl From<std::io::Error> for StorageError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(StorageErrorKind::Io, format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for StorageError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(StorageErrorKind::Codec, format!("JSON error: {}", err))
    }
}

#[cfg(feature = "sqlite")]
impl From<diesel::result::Error> for StorageError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::new(StorageErrorKind::Backend, format!("Diesel error: {}", err))
    }
}

#[cfg(feature = "sqlite")]
impl From<diesel::ConnectionError> for StorageError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        Self::new(StorageErrorKind::Backend, format!("Connection error: {}", err))
    }
}
