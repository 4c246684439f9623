//! Turning a URL into source content.

use std::sync::Arc;

use podgen_scrape::{is_tweet_url, parse_target, ScrapedPage, Source};
use tracing::{info, warn};

use super::{
    error::{Error, Result},
    prompt,
    service::{ChatModel, PageScraper},
    voice::VoiceRoster,
};

const TWEET_TITLE: &str = "Twitter/X帖子分析 - 播客内容";
const GENERATED_TITLE: &str = "AI生成内容";

/// Acquires content for a URL: tweets are analyzed by the language model,
/// other pages are scraped, and a page that cannot be scraped is described
/// by the language model as a last resort.
pub struct ContentAcquirer {
    scraper: Arc<dyn PageScraper>,
    llm: Option<Arc<dyn ChatModel>>,
    roster: VoiceRoster,
}

impl ContentAcquirer {
    pub fn new(scraper: Arc<dyn PageScraper>, llm: Option<Arc<dyn ChatModel>>) -> Self {
        Self {
            scraper,
            llm,
            roster: VoiceRoster::default(),
        }
    }

    pub fn with_roster(mut self, roster: VoiceRoster) -> Self {
        self.roster = roster;
        self
    }

    pub async fn acquire(&self, raw_url: &str) -> Result<ScrapedPage> {
        let url = parse_target(raw_url)?;

        if is_tweet_url(url.as_str()) {
            let llm = self.llm.as_ref().ok_or(Error::NotConfigured("OPENAI_API_KEY"))?;
            info!(url = %url, "analyzing tweet");
            let content = llm.complete(&prompt::tweet_analysis(&self.roster, url.as_str())?).await?;
            return Ok(ScrapedPage {
                url: url.to_string(),
                title: TWEET_TITLE.to_string(),
                content,
                source: Source::Twitter,
            });
        }

        let scrape_err = match self.scraper.scrape(&url).await {
            Ok(page) => return Ok(page),
            Err(e) => e,
        };

        let Some(llm) = &self.llm else {
            return Err(scrape_err.into());
        };
        warn!(url = %url, error = %scrape_err, "scraping failed, generating content from url");
        let request = prompt::url_fallback(&self.roster, url.as_str())?;
        match llm.complete(&request).await {
            Ok(content) => Ok(ScrapedPage {
                url: url.to_string(),
                title: GENERATED_TITLE.to_string(),
                content,
                source: Source::AiGenerated,
            }),
            Err(e) => {
                warn!(url = %url, error = %e, "content generation failed");
                Err(scrape_err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::Completion;
    use async_trait::async_trait;
    use tokio::sync::Mutex;
    use url::Url;

    struct MockScraper {
        result: Mutex<Option<podgen_scrape::Result<ScrapedPage>>>,
        calls: Mutex<u32>,
    }

    impl MockScraper {
        fn new(result: podgen_scrape::Result<ScrapedPage>) -> Arc<Self> {
            Arc::new(Self {
                result: Mutex::new(Some(result)),
                calls: Mutex::new(0),
            })
        }
    }

    #[async_trait]
    impl PageScraper for MockScraper {
        async fn scrape(&self, _url: &Url) -> podgen_scrape::Result<ScrapedPage> {
            *self.calls.lock().await += 1;
            self.result
                .lock()
                .await
                .take()
                .unwrap_or(Err(podgen_scrape::Error::Unreachable { status: 500 }))
        }
    }

    struct MockChat {
        reply: Result<String>,
        requests: Mutex<Vec<Completion>>,
    }

    #[async_trait]
    impl ChatModel for MockChat {
        async fn complete(&self, request: &Completion) -> Result<String> {
            self.requests.lock().await.push(request.clone());
            match &self.reply {
                Ok(s) => Ok(s.clone()),
                Err(_) => Err(Error::upstream("openai", "boom")),
            }
        }
    }

    fn chat(reply: Result<String>) -> Arc<MockChat> {
        Arc::new(MockChat {
            reply,
            requests: Mutex::new(Vec::new()),
        })
    }

    fn page(content: &str) -> ScrapedPage {
        ScrapedPage {
            url: "https://example.com/".to_string(),
            title: "t".to_string(),
            content: content.to_string(),
            source: Source::WebScraping,
        }
    }

    #[tokio::test]
    async fn scraped_pages_pass_through() {
        let acq = ContentAcquirer::new(MockScraper::new(Ok(page("本文"))), None);
        let got = acq.acquire("https://example.com/").await.unwrap();
        assert_eq!(got.content, "本文");
        assert_eq!(got.source, Source::WebScraping);
    }

    #[tokio::test]
    async fn invalid_url_is_rejected_before_scraping() {
        let scraper = MockScraper::new(Ok(page("x")));
        let acq = ContentAcquirer::new(scraper.clone(), None);
        let err = acq.acquire("ftp://example.com").await.unwrap_err();
        assert!(matches!(err, Error::Scrape(podgen_scrape::Error::UnsupportedScheme(_))));
        assert_eq!(*scraper.calls.lock().await, 0);
    }

    #[tokio::test]
    async fn tweets_need_a_language_model() {
        let scraper = MockScraper::new(Ok(page("x")));
        let acq = ContentAcquirer::new(scraper.clone(), None);
        let err = acq.acquire("https://x.com/jack/status/20").await.unwrap_err();
        assert!(matches!(err, Error::NotConfigured("OPENAI_API_KEY")));

        let llm = chat(Ok("ツイートの分析".to_string()));
        let acq = ContentAcquirer::new(scraper.clone(), Some(llm.clone()));
        let got = acq.acquire("https://x.com/jack/status/20").await.unwrap();
        assert_eq!(got.source, Source::Twitter);
        assert_eq!(got.content, "ツイートの分析");
        assert_eq!(*scraper.calls.lock().await, 0);
        assert_eq!(llm.requests.lock().await[0].max_tokens, 5000);
    }

    #[tokio::test]
    async fn scrape_failure_falls_back_to_generation() {
        let scraper = MockScraper::new(Err(podgen_scrape::Error::Unreachable { status: 403 }));
        let acq = ContentAcquirer::new(scraper, Some(chat(Ok("推定の内容".to_string()))));
        let got = acq.acquire("https://example.com/a").await.unwrap();
        assert_eq!(got.source, Source::AiGenerated);
        assert_eq!(got.content, "推定の内容");
    }

    #[tokio::test]
    async fn scrape_error_surfaces_without_model_or_when_generation_fails() {
        let scraper = MockScraper::new(Err(podgen_scrape::Error::Unreachable { status: 404 }));
        let err = ContentAcquirer::new(scraper, None)
            .acquire("https://example.com/a")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Scrape(podgen_scrape::Error::Unreachable { status: 404 })));

        let scraper = MockScraper::new(Err(podgen_scrape::Error::ContentTooShort { len: 12 }));
        let err = ContentAcquirer::new(scraper, Some(chat(Err(Error::EmptyResponse("openai")))))
            .acquire("https://example.com/a")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Scrape(podgen_scrape::Error::ContentTooShort { len: 12 })));
    }
}
