//! Error types for the vocab backend.

use thiserror::Error;

/// Result type alias using the vocab Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for vocabulary operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Word not found by id
    #[error("Word not found: {0}")]
    WordNotFound(i64),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A concurrent writer produced a state this operation cannot reconcile
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Translator backend failed
    #[error("Translation error: {0}")]
    Translation(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Stable, machine-readable failure kind surfaced to API callers.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::NotFound(_) | Error::WordNotFound(_) => "not_found",
            Error::InvalidInput(_) => "invalid_input",
            Error::Conflict(_) => "conflict",
            Error::Database(_)
            | Error::Translation(_)
            | Error::Serialization(_)
            | Error::Config(_)
            | Error::Internal(_) => "internal",
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
