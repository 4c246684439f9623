use axum::{extract::rejection::JsonRejection, extract::State, Json};
use podgen_scrape::{ScrapedPage, Source};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{required, timestamp};
use crate::{error::ApiError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ScrapeResponse {
    pub success: bool,
    pub url: String,
    pub content: String,
    pub title: String,
    pub metadata: ScrapeMetadata,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeMetadata {
    pub content_length: usize,
    pub source: Source,
    pub scraped_at: String,
}

impl ScrapeResponse {
    fn new(url: &str, page: ScrapedPage) -> Self {
        Self {
            success: true,
            url: url.to_string(),
            metadata: ScrapeMetadata {
                content_length: page.content.chars().count(),
                source: page.source,
                scraped_at: timestamp(),
            },
            content: page.content,
            title: page.title,
        }
    }
}

/// `POST /scrape`
pub async fn scrape(
    State(state): State<AppState>,
    payload: Result<Json<ScrapeRequest>, JsonRejection>,
) -> Result<Json<ScrapeResponse>, ApiError> {
    let Json(req) = payload?;
    let url =
        required(req.url.as_deref()).ok_or_else(|| ApiError::bad_request("请提供URL链接"))?;
    info!(url, "scrape requested");

    let page = state.acquirer().acquire(url).await.map_err(scrape_error)?;
    info!(
        url,
        source = page.source.as_str(),
        len = page.content.chars().count(),
        "content acquired"
    );
    Ok(Json(ScrapeResponse::new(url, page)))
}

/// Malformed or non-http(s) URLs are input errors on every endpoint.
pub(super) fn invalid_url(e: &podgen::Error) -> Option<ApiError> {
    use podgen_scrape::Error as S;
    match e {
        podgen::Error::Scrape(S::InvalidUrl(_)) => Some(ApiError::bad_request("URL格式无效")),
        podgen::Error::Scrape(S::UnsupportedScheme(_)) => {
            Some(ApiError::bad_request("URL必须是http或https协议"))
        }
        _ => None,
    }
}

fn scrape_error(e: podgen::Error) -> ApiError {
    use podgen_scrape::Error as S;
    if let Some(err) = invalid_url(&e) {
        return err;
    }
    match e {
        podgen::Error::Scrape(e @ S::Unreachable { .. }) => {
            ApiError::bad_request("无法访问该网页").with_details(e)
        }
        podgen::Error::Scrape(S::ContentTooShort { .. }) => ApiError::bad_request("提取的内容过短"),
        podgen::Error::Scrape(e) => ApiError::internal("网页抓取失败").with_details(e),
        podgen::Error::NotConfigured(key) => ApiError::not_configured(key),
        e => ApiError::internal("内容处理失败").with_details(e),
    }
}
