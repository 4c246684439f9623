//! Web page content acquisition.
//!
//! Turns a URL into plain text suitable for prompting: an optional
//! Firecrawl-style scraping service first, then a direct fetch with
//! tag-stripping extraction. Tweet URLs are only detected here; their
//! analysis needs a language model and lives with the caller.

mod error;
mod extract;
mod fetch;
mod firecrawl;
mod scraper;
mod target;

pub use error::{Error, Result};
pub use extract::{extract_text, truncate_chars, MAX_CONTENT_CHARS, MIN_CONTENT_CHARS};
pub use fetch::{Fetcher, USER_AGENT};
pub use firecrawl::{FirecrawlClient, DEFAULT_FIRECRAWL_URL};
pub use scraper::{ScrapedPage, Source, WebScraper};
pub use target::{is_tweet_url, parse_target};
