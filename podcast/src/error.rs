//! Error types for podcast generation.

use thiserror::Error;

/// Result type alias for podcast generation.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for podcast generation.
#[derive(Error, Debug)]
pub enum Error {
    /// A remote service (LLM, TTS) failed.
    #[error("{service}: {message}")]
    Upstream {
        service: &'static str,
        message: String,
        http_status: Option<u16>,
    },

    /// A remote service answered without usable content.
    #[error("{0} returned an empty response")]
    EmptyResponse(&'static str),

    /// The generated script contained no recognizable dialogue line.
    #[error("no dialogue lines found in script ({script_len} chars)")]
    NoDialogue { script_len: usize, preview: String },

    /// A required credential is missing; holds its variable name.
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    #[error("scrape: {0}")]
    Scrape(#[from] podgen_scrape::Error),

    #[error("prompt template: {0}")]
    Prompt(#[from] minijinja::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn upstream(service: &'static str, message: impl Into<String>) -> Self {
        Error::Upstream {
            service,
            message: message.into(),
            http_status: None,
        }
    }

    /// Returns the HTTP status reported by the failing remote, if any.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Error::Upstream { http_status, .. } => *http_status,
            _ => None,
        }
    }
}

impl From<podgen_minimax::Error> for Error {
    fn from(e: podgen_minimax::Error) -> Self {
        let message = match &e {
            podgen_minimax::Error::Api {
                status_code,
                status_msg,
                ..
            } => format!("{} (code={})", status_msg, status_code),
            e => e.to_string(),
        };
        Error::Upstream {
            service: "minimax",
            http_status: e.http_status(),
            message,
        }
    }
}

impl From<podgen_openai::Error> for Error {
    fn from(e: podgen_openai::Error) -> Self {
        match e {
            podgen_openai::Error::EmptyCompletion => Error::EmptyResponse("openai"),
            podgen_openai::Error::Api { status, message } => Error::Upstream {
                service: "openai",
                http_status: Some(status),
                message,
            },
            e => Error::Upstream {
                service: "openai",
                http_status: e.http_status(),
                message: e.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimax_errors_keep_http_status() {
        let e: Error = podgen_minimax::Error::api(1004, "not found", 404).into();
        assert_eq!(e.http_status(), Some(404));
        assert_eq!(e.to_string(), "minimax: not found (code=1004)");
    }

    #[test]
    fn empty_completion_maps_to_empty_response() {
        let e: Error = podgen_openai::Error::EmptyCompletion.into();
        assert!(matches!(e, Error::EmptyResponse("openai")));
    }
}
