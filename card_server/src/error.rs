//! Error types for card_server

use std::path::PathBuf;
use thiserror::Error;

/// Why a pack config could not be used
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file does not exist
    #[error("Pack config not found: {}", .0.display())]
    Missing(PathBuf),
    /// Config file exists but could not be read
    #[error("Failed to read pack config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Config file is not a valid pack mapping
    #[error("Malformed pack config {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Config parsed but defines no packs
    #[error("Pack config {} defines no packs", .0.display())]
    Empty(PathBuf),
    /// A pack declares zero cards
    #[error("Pack '{0}' has totalCards = 0")]
    ZeroCards(String),
}

/// Unified error type for card_server operations
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Unknown pack id
    #[error("Pack not found: {id}")]
    NotFound { id: String },
    /// Asked for more cards than the pack holds (or for none)
    #[error("Cannot draw {requested} distinct cards from a pack of {available}")]
    InvalidDrawRequest { requested: u32, available: u32 },
    /// Query string could not be parsed (e.g. `?count=abc`)
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
    /// Listener or other I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for card_server operations
pub type Result<T> = std::result::Result<T, ServerError>;
