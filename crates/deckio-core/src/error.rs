//! Error types for deckio-core.

use thiserror::Error;

/// Main error type for registry, metadata and configuration operations.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid tag {tag:?}: expected exactly 4 bytes, got {len}")]
    InvalidTag { tag: String, len: usize },

    #[error("Unknown registry name: {0}")]
    UnknownName(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for deckio-core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
