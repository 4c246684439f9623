//! Error types for content acquisition.

use thiserror::Error;

/// Result type alias for scraping operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for scraping operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The input could not be parsed as a URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// Only http and https are fetched.
    #[error("unsupported url scheme: {0}")]
    UnsupportedScheme(String),

    /// The page answered with a non-2xx status.
    #[error("page unreachable (http={status})")]
    Unreachable { status: u16 },

    /// Extracted text was below the usable minimum.
    #[error("extracted content too short ({len} chars)")]
    ContentTooShort { len: usize },

    /// The scraping service rejected the request.
    #[error("scraping service: {message} (http={status})")]
    Service { status: u16, message: String },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns true for errors caused by the caller's input rather than
    /// by a remote party.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidUrl(_)
                | Error::UnsupportedScheme(_)
                | Error::Unreachable { .. }
                | Error::ContentTooShort { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors() {
        assert!(Error::InvalidUrl("x".into()).is_client_error());
        assert!(Error::Unreachable { status: 404 }.is_client_error());
        assert!(Error::ContentTooShort { len: 3 }.is_client_error());
        assert!(
            !Error::Service {
                status: 500,
                message: "down".into()
            }
            .is_client_error()
        );
    }
}
