//! Error types for countdown.

use thiserror::Error;

/// Errors that can occur in countdown operations.
#[derive(Error, Debug)]
pub enum CountdownError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server responded with status {0}")]
    Status(u16),

    #[error("Not signed in: an access token is required")]
    MissingToken,

    #[error("Invalid event date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for countdown operations.
pub type CountdownResult<T> = Result<T, CountdownError>;
