//! Seams to the remote services the pipeline drives.
//!
//! Vendor adapters live in [`crate::backends`]; tests substitute mocks.

use async_trait::async_trait;
use podgen_minimax::{TaskStatus, VoiceListResponse};
use podgen_scrape::ScrapedPage;
use url::Url;

use super::error::Result;

/// A single chat completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
    pub temperature: f64,
}

/// Text generation.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Returns the completion text; empty completions are errors.
    async fn complete(&self, request: &Completion) -> Result<String>;
}

/// Audio returned by one synthesis call.
#[derive(Debug, Clone, Default)]
pub struct SpeechClip {
    /// Encoded audio; empty when the service accepted the call but
    /// produced nothing.
    pub audio: Vec<u8>,
    /// Reported duration in milliseconds.
    pub duration_ms: Option<i64>,
}

/// Short text to speech.
#[async_trait]
pub trait SpeechBackend: Send + Sync {
    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<SpeechClip>;
}

/// State of a long-text synthesis task.
#[derive(Debug, Clone)]
pub struct TaskReport {
    pub status: TaskStatus,
    /// Download URL, resolved once the task succeeded.
    pub audio_url: Option<String>,
    pub error_message: Option<String>,
}

/// Long text to speech, run as a remote task.
#[async_trait]
pub trait LongformSpeech: Send + Sync {
    /// Submits `text` and returns the task id.
    async fn submit(&self, text: &str, voice_id: &str) -> Result<String>;

    async fn status(&self, task_id: &str) -> Result<TaskReport>;
}

/// Remote voice listing.
#[async_trait]
pub trait VoiceCatalog: Send + Sync {
    async fn list_voices(&self) -> Result<VoiceListResponse>;
}

/// Web page scraping.
#[async_trait]
pub trait PageScraper: Send + Sync {
    async fn scrape(&self, url: &Url) -> podgen_scrape::Result<ScrapedPage>;
}
