//! Session configuration.

use crate::{GameSerializer, Name};
use crate::storage::{FileStorage, GameStorage, MemoryStorage, StorageError};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use strictly_reversi::Game;
use tracing::{debug, info, instrument};

/// Where games are stored.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum::Display, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StorageBackend {
    /// In-process only; remote games are visible to this process alone.
    Memory,
    /// One text file per game.
    #[default]
    File,
    /// SQLite database (requires the `sqlite` feature).
    Sqlite,
}

/// Configuration for the `reversi` front end.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct ClashConfig {
    /// Storage backend.
    #[serde(default)]
    storage: StorageBackend,

    /// Directory for the file backend.
    #[serde(default = "default_storage_dir")]
    storage_dir: PathBuf,

    /// Database path for the sqlite backend.
    #[serde(default = "default_database_url")]
    database_url: String,

    /// Wait between auto-refresh attempts, in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    poll_interval_ms: u64,

    /// Delay inside each auto-refresh read, in milliseconds.
    #[serde(default = "default_refresh_delay_ms")]
    refresh_delay_ms: u64,

    /// Show legal targets in new sessions.
    #[serde(default)]
    show_targets: bool,
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from("games")
}

fn default_database_url() -> String {
    "reversi.db".to_string()
}

fn default_poll_interval_ms() -> u64 {
    3000
}

fn default_refresh_delay_ms() -> u64 {
    5000
}

impl Default for ClashConfig {
    fn default() -> Self {
        Self {
            storage: StorageBackend::default(),
            storage_dir: default_storage_dir(),
            database_url: default_database_url(),
            poll_interval_ms: default_poll_interval_ms(),
            refresh_delay_ms: default_refresh_delay_ms(),
            show_targets: false,
        }
    }
}

impl ClashConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the text is not valid configuration.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        info!(storage = %config.storage, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but is invalid.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Returns a copy using `storage` instead of the configured backend.
    pub fn with_storage(mut self, storage: StorageBackend) -> Self {
        self.storage = storage;
        self
    }

    /// Wait between auto-refresh attempts.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Delay inside each auto-refresh read.
    pub fn refresh_delay(&self) -> Duration {
        Duration::from_millis(self.refresh_delay_ms)
    }

    /// Opens the configured backend.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be opened.
    #[instrument(skip(self), fields(storage = %self.storage))]
    pub fn open_storage(&self) -> Result<GameStorage, StorageError> {
        match self.storage {
            StorageBackend::Memory => Ok(Arc::new(MemoryStorage::<Name, Game>::new())),
            StorageBackend::File => Ok(Arc::new(FileStorage::<Game, _>::new(
                &self.storage_dir,
                GameSerializer,
            ))),
            StorageBackend::Sqlite => self.open_sqlite(),
        }
    }

    #[cfg(feature = "sqlite")]
    fn open_sqlite(&self) -> Result<GameStorage, StorageError> {
        let storage = crate::storage::SqliteStorage::<Game, _>::open(
            self.database_url.clone(),
            GameSerializer,
        )?;
        Ok(Arc::new(storage))
    }

    #[cfg(not(feature = "sqlite"))]
    fn open_sqlite(&self) -> Result<GameStorage, StorageError> {
        Err(StorageError::new(
            crate::storage::StorageErrorKind::Backend,
            "Built without the `sqlite` feature",
        ))
    }
}

/// Configuration error.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// What failed to load.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a configuration error at the caller's location.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
