//! Endpoint handlers.

pub mod diagnostics;
pub mod generate;
pub mod podcast;
pub mod scrape;
pub mod status;
pub mod voices;

use axum::http::StatusCode;
use chrono::{SecondsFormat, Utc};

use crate::error::ApiError;

/// Current time as an RFC 3339 UTC timestamp with milliseconds.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Answers any `OPTIONS` request that is not a CORS preflight.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed()
}

/// Trims `value` and treats blank as missing.
pub(crate) fn required(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
