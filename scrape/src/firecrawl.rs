//! Firecrawl-style scraping service client.

use std::time::Duration;

use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client as ReqwestClient,
};
use serde::{Deserialize, Serialize};
use url::Url;

use super::error::{Error, Result};

/// Default scraping service base URL.
pub const DEFAULT_FIRECRAWL_URL: &str = "https://api.firecrawl.dev";

/// Client for the `/v1/scrape` endpoint.
#[derive(Clone)]
pub struct FirecrawlClient {
    http: ReqwestClient,
    api_key: String,
    base_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScrapeRequest<'a> {
    url: &'a str,
    formats: [&'static str; 1],
    only_main_content: bool,
}

#[derive(Deserialize)]
struct ScrapeResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<ScrapeData>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct ScrapeData {
    #[serde(default)]
    markdown: String,
    #[serde(default)]
    metadata: Option<ScrapeMetadata>,
}

#[derive(Deserialize)]
struct ScrapeMetadata {
    #[serde(default)]
    title: Option<String>,
}

/// Markdown content returned by the scraping service.
#[derive(Debug, Clone)]
pub(crate) struct FirecrawlPage {
    pub title: Option<String>,
    pub markdown: String,
}

impl FirecrawlClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let http = ReqwestClient::builder()
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) async fn scrape(&self, url: &Url) -> Result<FirecrawlPage> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key)).map_err(|e| {
                Error::Service {
                    status: 0,
                    message: format!("invalid api key header: {}", e),
                }
            })?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let response = self
            .http
            .post(format!("{}/v1/scrape", self.base_url))
            .headers(headers)
            .json(&ScrapeRequest {
                url: url.as_str(),
                formats: ["markdown"],
                only_main_content: true,
            })
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?;
        if !(200..300).contains(&status) {
            return Err(Error::Service {
                status,
                message: String::from_utf8_lossy(&body).to_string(),
            });
        }

        decode_response(&body, status)
    }
}

fn decode_response(body: &[u8], status: u16) -> Result<FirecrawlPage> {
    let resp: ScrapeResponse = serde_json::from_slice(body)?;
    match resp.data {
        Some(data) if resp.success => Ok(FirecrawlPage {
            title: data.metadata.and_then(|m| m.title).filter(|t| !t.is_empty()),
            markdown: data.markdown,
        }),
        _ => Err(Error::Service {
            status,
            message: resp
                .error
                .unwrap_or_else(|| "scrape returned no data".to_string()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_success() {
        let body = br##"{"success":true,"data":{"markdown":"# Title\n\nbody","metadata":{"title":"Title"}}}"##;
        let page = decode_response(body, 200).unwrap();
        assert_eq!(page.title.as_deref(), Some("Title"));
        assert!(page.markdown.contains("body"));
    }

    #[test]
    fn unsuccessful_body_is_service_error() {
        let body = br#"{"success":false,"error":"blocked"}"#;
        match decode_response(body, 200) {
            Err(Error::Service { status, message }) => {
                assert_eq!(status, 200);
                assert_eq!(message, "blocked");
            }
            other => panic!("unexpected: {:?}", other.map(|p| p.markdown)),
        }
    }

    #[test]
    fn base_url_is_trimmed() {
        let c = FirecrawlClient::new("fc-key", "https://api.firecrawl.dev/").unwrap();
        assert_eq!(c.base_url(), DEFAULT_FIRECRAWL_URL);
    }
}
