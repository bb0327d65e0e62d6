//! API error types.

use spa_store::StoreError;
use thiserror::Error;

/// Errors returned by API calls.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("{message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// The response's `detail`, or a generic status message.
        message: String,
    },

    /// The request never got an answer.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body was not the JSON we expected.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A login response did not carry a token.
    #[error("login response did not include an access token")]
    MissingToken,

    /// The session could not be read or written.
    #[error(transparent)]
    Session(#[from] StoreError),
}

impl ApiError {
    /// Returns a user-friendly error message suitable for display.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Http { status: 401, .. } => "Your session has expired. Please log in again.",
            Self::Http { status: 404, .. } => "The requested item was not found.",
            Self::Http { message, .. } => message,
            Self::Network(_) => "Could not reach the server. Please check your connection.",
            Self::JsonParse(_) | Self::MissingToken => "The server sent an unexpected response.",
            Self::Session(_) => "Your session could not be saved.",
        }
    }

    /// The HTTP status, when the server answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;
