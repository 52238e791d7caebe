//! Error types for the voice assistant.

use thiserror::Error;

/// Result type alias for assistant operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while handling a voice command
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Speech recognition session failed
    #[error("speech recognition error: {0}")]
    Recognition(String),

    /// Speech synthesis enqueue failed
    #[error("speech synthesis error: {0}")]
    Synthesis(String),

    /// Interpreter returned a non-success status
    #[error("interpreter returned {status}: {body}")]
    Interpreter {
        status: reqwest::StatusCode,
        body: String,
    },

    /// Malformed interpreter response (bad JSON or a disallowed parameter kind)
    #[error("malformed interpreter response: {0}")]
    Protocol(String),

    /// HTTP transport error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}
