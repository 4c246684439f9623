//! URL validation and classification.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use super::error::{Error, Result};

static TWEET_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://(twitter\.com|x\.com)/\w+/status/\d+").expect("valid regex")
});

/// Parses `raw` and checks that it is an http(s) URL.
pub fn parse_target(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| Error::InvalidUrl(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::UnsupportedScheme(other.to_string())),
    }
}

/// Reports whether `url` points at a single tweet on twitter.com or x.com.
pub fn is_tweet_url(url: &str) -> bool {
    TWEET_URL.is_match(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_https() {
        assert!(parse_target("https://example.com/a").is_ok());
        assert!(parse_target("  http://example.com ").is_ok());
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(parse_target("not a url"), Err(Error::InvalidUrl(_))));
        assert!(matches!(
            parse_target("ftp://example.com/file"),
            Err(Error::UnsupportedScheme(s)) if s == "ftp"
        ));
    }

    #[test]
    fn tweet_detection() {
        assert!(is_tweet_url("https://x.com/jack/status/20"));
        assert!(is_tweet_url("http://twitter.com/some_user/status/1234567890?s=20"));
        assert!(!is_tweet_url("https://x.com/jack"));
        assert!(!is_tweet_url("https://example.com/x.com/a/status/1"));
        assert!(!is_tweet_url("https://mobile.twitter.com/a/status/1"));
    }
}
