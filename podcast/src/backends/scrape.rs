use async_trait::async_trait;
use podgen_scrape::{Result, ScrapedPage, WebScraper};
use url::Url;

use crate::service::PageScraper;

#[async_trait]
impl PageScraper for WebScraper {
    async fn scrape(&self, url: &Url) -> Result<ScrapedPage> {
        WebScraper::scrape(self, url).await
    }
}
