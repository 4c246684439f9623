//! Error types for the chat completion client.

use thiserror::Error;

/// Result type alias for chat completion operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for chat completion operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Non-2xx response; `message` is the upstream error text.
    #[error("openai: {message} (http={status})")]
    Api { status: u16, message: String },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    /// The completion carried no message content.
    #[error("completion returned no content")]
    EmptyCompletion,
}

impl Error {
    /// Returns the HTTP status of the failed response, if any.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
