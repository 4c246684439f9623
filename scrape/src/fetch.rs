//! Direct page fetch.

use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{header, Client as ReqwestClient};
use url::Url;

use super::{
    error::{Error, Result},
    extract::{extract_text, MIN_CONTENT_CHARS},
};

/// User agent sent with direct fetches.
pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; AI-Podcast-Bot/1.0)";

static TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("valid regex"));

/// Fetches pages directly and extracts their text.
#[derive(Clone)]
pub struct Fetcher {
    http: ReqwestClient,
}

/// Text pulled out of a fetched page.
#[derive(Debug, Clone)]
pub(crate) struct FetchedText {
    pub title: Option<String>,
    pub content: String,
}

impl Fetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = ReqwestClient::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }

    /// Fetches `url` and returns the extracted text.
    ///
    /// Non-2xx answers yield [`Error::Unreachable`]; extractions under
    /// [`MIN_CONTENT_CHARS`] yield [`Error::ContentTooShort`].
    pub(crate) async fn fetch(&self, url: &Url) -> Result<FetchedText> {
        let response = self
            .http
            .get(url.as_str())
            .header(header::USER_AGENT, USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Unreachable {
                status: status.as_u16(),
            });
        }

        let html = response.text().await?;
        parse_html(&html)
    }
}

pub(crate) fn parse_html(html: &str) -> Result<FetchedText> {
    let content = extract_text(html);
    let len = content.chars().count();
    if len < MIN_CONTENT_CHARS {
        return Err(Error::ContentTooShort { len });
    }

    let title = TITLE
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|t| !t.is_empty());

    Ok(FetchedText { title, content })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_html_extracts_title_and_body() {
        let body = "ニュース本文。".repeat(20);
        let html = format!(
            "<html><head><title>\n  今日の  話題 </title></head><body><p>{}</p></body></html>",
            body
        );
        let page = parse_html(&html).unwrap();
        assert_eq!(page.title.as_deref(), Some("今日の 話題"));
        assert!(page.content.contains("ニュース本文。"));
    }

    #[test]
    fn parse_html_rejects_short_pages() {
        let err = parse_html("<p>短い</p>").unwrap_err();
        assert!(matches!(err, Error::ContentTooShort { len: 2 }));
    }
}
