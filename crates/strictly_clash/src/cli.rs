//! Command-line interface for the `reversi` binary.

use clap::Parser;
use strictly_clash::StorageBackend;

/// Reversi - play locally or share a game through storage
#[derive(Parser, Debug)]
#[command(name = "reversi")]
#[command(about = "Two-player Reversi in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "reversi.toml")]
    pub config: std::path::PathBuf,

    /// Override the configured storage backend
    #[arg(long, value_enum)]
    pub storage: Option<StorageBackend>,
}
