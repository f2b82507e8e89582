//! Error types shared by the server and client crates

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CardError {
    /// Rarity name not one of common/rare/epic/legendary
    #[error("Unknown rarity: {0}")]
    InvalidRarity(String),
    /// Deck filter that is neither "all" nor a rarity name
    #[error("Unknown filter: {0} (expected \"all\" or a rarity)")]
    InvalidFilter(String),
}

pub type Result<T> = std::result::Result<T, CardError>;
