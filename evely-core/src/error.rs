//! Error types for the evely ecosystem.

use thiserror::Error;

/// Errors that can occur in evely operations.
#[derive(Error, Debug)]
pub enum EvelyError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored value under '{key}' is not valid JSON: {message}")]
    Decode { key: String, message: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Please fill in both fields (missing {0})")]
    MissingField(&'static str),

    #[error("Event '{0}' is a bundled sample event and cannot be deleted")]
    BundledEvent(String),

    #[error("Not signed in: {0}")]
    NotAuthenticated(String),

    #[error("Invalid credentials for '{0}'")]
    InvalidCredentials(String),
}

/// Result type alias for evely operations.
pub type EvelyResult<T> = Result<T, EvelyError>;
