//! MiniMax API client.

use std::sync::Arc;

use super::{
    error::{Error, Result},
    file::FileService,
    http::HttpClient,
    speech::SpeechService,
    task::Task,
    voice::VoiceService,
};

/// Default MiniMax API base URL (China).
pub const DEFAULT_BASE_URL: &str = "https://api.minimaxi.com";

/// MiniMax API base URL for global/overseas users.
pub const BASE_URL_GLOBAL: &str = "https://api.minimaxi.chat";

/// MiniMax international platform base URL.
pub const BASE_URL_IO: &str = "https://api.minimax.io";

/// Default maximum number of retries.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// MiniMax API client.
///
/// # Example
///
/// ```rust,ignore
/// use podgen_minimax::{Client, BASE_URL_IO};
///
/// let client = Client::builder("your-api-key")
///     .base_url(BASE_URL_IO)
///     .build()?;
///
/// let response = client.speech().synthesize(&request).await?;
/// ```
pub struct Client {
    http: Arc<HttpClient>,
    config: ClientConfig,
}

#[derive(Clone)]
struct ClientConfig {
    api_key: String,
    base_url: String,
    group_id: Option<String>,
}

impl Client {
    /// Creates a new MiniMax API client with default settings.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        ClientBuilder::new(api_key).build()
    }

    /// Creates a new client builder for more configuration options.
    pub fn builder(api_key: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(api_key)
    }

    /// Returns the configured API key.
    pub fn api_key(&self) -> &str {
        &self.config.api_key
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Returns the configured group id, if any.
    pub fn group_id(&self) -> Option<&str> {
        self.config.group_id.as_deref()
    }

    /// Returns the speech synthesis service.
    pub fn speech(&self) -> SpeechService {
        SpeechService::new(self.http.clone())
    }

    /// Returns the voice management service.
    pub fn voice(&self) -> VoiceService {
        VoiceService::new(self.http.clone())
    }

    /// Returns the file service.
    pub fn file(&self) -> FileService {
        FileService::new(self.http.clone())
    }

    /// Returns a handle to an existing async speech task.
    pub fn task(&self, task_id: impl Into<String>) -> Task {
        Task::new(task_id.into(), self.http.clone())
    }

    /// Returns a reference to the internal HTTP client.
    pub fn http(&self) -> &Arc<HttpClient> {
        &self.http
    }
}

/// Builder for creating a MiniMax API client.
pub struct ClientBuilder {
    api_key: String,
    base_url: String,
    group_id: Option<String>,
    max_retries: u32,
}

impl ClientBuilder {
    /// Creates a new client builder.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            group_id: None,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Sets a custom base URL for the API.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the `GroupId` query parameter sent with every request.
    pub fn group_id(mut self, group_id: impl Into<String>) -> Self {
        let group_id = group_id.into();
        self.group_id = if group_id.is_empty() { None } else { Some(group_id) };
        self
    }

    /// Sets the maximum number of retries for transient errors.
    ///
    /// Zero disables transport-level retries entirely, leaving retry
    /// decisions to the caller.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Builds the client.
    pub fn build(self) -> Result<Client> {
        if self.api_key.trim().is_empty() {
            return Err(Error::Config("api_key must be non-empty".to_string()));
        }

        let base_url = self.base_url.trim_end_matches('/').to_string();
        let http = HttpClient::new(
            base_url.clone(),
            self.api_key.clone(),
            self.group_id.clone(),
            self.max_retries,
        )?;

        Ok(Client {
            http: Arc::new(http),
            config: ClientConfig {
                api_key: self.api_key,
                base_url,
                group_id: self.group_id,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_rejects_blank_key() {
        let err = Client::builder("   ").build().err().expect("blank key must fail");
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn build_trims_trailing_slash() {
        let client = Client::builder("key")
            .base_url("https://api.minimax.io/")
            .build()
            .unwrap();
        assert_eq!(client.base_url(), BASE_URL_IO);
        assert_eq!(client.group_id(), None);
    }

    #[test]
    fn empty_group_id_is_ignored() {
        let client = Client::builder("key").group_id("").build().unwrap();
        assert_eq!(client.group_id(), None);

        let client = Client::builder("key").group_id("1869").build().unwrap();
        assert_eq!(client.group_id(), Some("1869"));
    }
}
