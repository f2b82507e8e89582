use thiserror::Error;

/// Unified error type for the card reveal client
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP error status code
    #[error("HTTP error: {0}")]
    HttpStatus(reqwest::StatusCode),
    /// Server refused the request and said why (`{"error": "..."}`)
    #[error("Server rejected request ({status}): {message}")]
    Rejected {
        status: reqwest::StatusCode,
        message: String,
    },
    /// Failed to parse JSON
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Pack id not offered by the server
    #[error("Pack not found: {0}")]
    UnknownPack(String),
    /// Deal requested before any pack was chosen
    #[error("No pack selected")]
    NoPackSelected,
    /// Selection needs the rarity, which only exists after the flip
    #[error("Card {0} has not been flipped yet")]
    CardNotRevealed(usize),
    /// No dealt card at this position
    #[error("No card at position {0}")]
    NoCardAt(usize),
    /// Export attempted with nothing selected
    #[error("Your deck is empty. Select some cards before exporting.")]
    EmptyDeck,
    /// A single card image could not be fetched
    #[error("Failed to fetch {reference}: {reason}")]
    FetchFailure { reference: String, reason: String },
    /// Writing the archive failed
    #[error("Failed to build archive: {0}")]
    Archive(#[source] std::io::Error),
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;
