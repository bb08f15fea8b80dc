//! Error types for the chat widget.

use thiserror::Error;

/// Failure of a single chat exchange.
#[derive(Error, Debug)]
pub enum ChatError {
    /// The server answered with a non-2xx status.
    #[error("Server responded with status {status}")]
    BadResponse {
        /// HTTP status code.
        status: u16,
    },

    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body was not the expected JSON.
    #[error("JSON error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Invalid endpoint URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// The two classes of failure the widget distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Non-success HTTP status.
    BadResponse,
    /// Network failure or unreadable body.
    TransportOrParse,
}

impl ChatError {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BadResponse { .. } => ErrorKind::BadResponse,
            Self::Transport(_) | Self::Parse(_) | Self::InvalidUrl(_) => {
                ErrorKind::TransportOrParse
            }
        }
    }
}

/// Result type alias for widget transport operations.
pub type Result<T> = std::result::Result<T, ChatError>;
