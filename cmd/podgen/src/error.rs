//! JSON error responses.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, warn};

/// An error answered as `{error, details?, debug?}`.
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
            details: None,
            debug: None,
        }
    }

    pub fn bad_request(error: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error)
    }

    pub fn internal(error: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, error)
    }

    /// A required credential is missing.
    pub fn not_configured(key: &str) -> Self {
        let service = match key {
            "OPENAI_API_KEY" => "OpenAI API Key",
            "MINIMAX_API_KEY" => "MiniMax API Key",
            other => other,
        };
        Self::internal(format!("未配置{}", service))
    }

    pub fn method_not_allowed() -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
    }

    pub fn with_details(mut self, details: impl ToString) -> Self {
        self.details = Some(details.to_string());
        self
    }

    pub fn with_debug(mut self, debug: Value) -> Self {
        self.debug = Some(debug);
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(
                status = %self.status,
                error = %self.error,
                details = ?self.details,
                "request failed"
            );
        } else {
            warn!(status = %self.status, error = %self.error, "request rejected");
        }
        (self.status, Json(self)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request("请求体必须是有效的JSON").with_details(rejection.body_text())
    }
}

impl From<podgen::Error> for ApiError {
    fn from(e: podgen::Error) -> Self {
        match e {
            podgen::Error::NotConfigured(key) => ApiError::not_configured(key),
            e => ApiError::internal("内部错误").with_details(e),
        }
    }
}
