//! Error types for the MiniMax API client.

use thiserror::Error;

/// API error status codes.
pub mod status_code {
    pub const INVALID_API_KEY: i32 = 1001;
    pub const RATE_LIMIT: i32 = 1002;
    pub const SERVER_ERROR_MIN: i32 = 5000;
}

/// Result type alias for MiniMax operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for MiniMax API operations.
#[derive(Error, Debug)]
pub enum Error {
    /// API error returned by MiniMax, either as a non-2xx response or a
    /// non-zero `base_resp.status_code`.
    #[error("minimax: {status_msg} (code={status_code}, http={http_status})")]
    Api {
        status_code: i32,
        status_msg: String,
        http_status: u16,
    },

    /// HTTP request error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Hex decoding error.
    #[error("hex decode error: {0}")]
    HexDecode(#[from] hex::FromHexError),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Task failed.
    #[error("task failed: {0}")]
    TaskFailed(String),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Creates a new API error.
    pub fn api(status_code: i32, status_msg: impl Into<String>, http_status: u16) -> Self {
        Error::Api {
            status_code,
            status_msg: status_msg.into(),
            http_status,
        }
    }

    /// Returns the HTTP status of the failed response, if the error came
    /// from one.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Error::Api { http_status, .. } => Some(*http_status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns true if this is a rate limit error.
    pub fn is_rate_limit(&self) -> bool {
        match self {
            Error::Api {
                status_code,
                http_status,
                ..
            } => *status_code == status_code::RATE_LIMIT || *http_status == 429,
            _ => false,
        }
    }

    /// Returns true if this is an invalid API key error.
    pub fn is_invalid_api_key(&self) -> bool {
        match self {
            Error::Api {
                status_code,
                http_status,
                ..
            } => *status_code == status_code::INVALID_API_KEY || *http_status == 401,
            _ => false,
        }
    }

    /// Returns true if this is a server-side error.
    pub fn is_server_error(&self) -> bool {
        match self {
            Error::Api {
                status_code,
                http_status,
                ..
            } => *status_code >= status_code::SERVER_ERROR_MIN || *http_status >= 500,
            _ => false,
        }
    }

    /// Returns true if the request can be retried.
    pub fn is_retryable(&self) -> bool {
        self.is_rate_limit() || self.is_server_error()
    }
}
