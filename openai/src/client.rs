//! Chat completion client.

use std::time::Duration;

use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client as ReqwestClient,
};

use super::{
    chat::{ChatCompletionRequest, ChatCompletionResponse},
    error::{Error, Result},
};

/// Default OpenAI API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Model used when the request leaves `model` empty.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// OpenAI-compatible API client.
pub struct Client {
    http: ReqwestClient,
    api_key: String,
    base_url: String,
    model: String,
}

impl Client {
    /// Creates a new client with default settings.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        ClientBuilder::new(api_key).build()
    }

    pub fn builder(api_key: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(api_key)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the default model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Creates a chat completion.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let request = ChatCompletionRequest {
    ///     messages: vec![Message::user("こんにちは")],
    ///     ..Default::default()
    /// };
    ///
    /// let response = client.create_chat_completion(&request).await?;
    /// ```
    pub async fn create_chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        let mut request = request.clone();
        if request.model.is_empty() {
            request.model = self.model.clone();
        }

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .headers(self.default_headers()?)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                message: String::from_utf8_lossy(&body).to_string(),
            });
        }

        serde_json::from_slice(&body).map_err(Error::from)
    }

    /// Creates a chat completion and returns the first choice's content.
    pub async fn complete(&self, request: &ChatCompletionRequest) -> Result<String> {
        let response = self.create_chat_completion(request).await?;
        response
            .first_content()
            .map(str::to_string)
            .ok_or(Error::EmptyCompletion)
    }

    fn default_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))
                .map_err(|e| Error::Config(format!("invalid api key header: {}", e)))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}

/// Builder for creating a chat completion client.
pub struct ClientBuilder {
    api_key: String,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl ClientBuilder {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(120),
        }
    }

    /// Sets a custom base URL (e.g. a compatible proxy).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the default model.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<Client> {
        if self.api_key.trim().is_empty() {
            return Err(Error::Config("api_key must be non-empty".to_string()));
        }
        if self.model.trim().is_empty() {
            return Err(Error::Config("model must be non-empty".to_string()));
        }

        let http = ReqwestClient::builder().timeout(self.timeout).build()?;

        Ok(Client {
            http,
            api_key: self.api_key,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            model: self.model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let client = Client::new("sk-test").unwrap();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
        assert_eq!(client.model(), DEFAULT_MODEL);
    }

    #[test]
    fn builder_rejects_blank_key_and_model() {
        assert!(matches!(Client::new(" ").err(), Some(Error::Config(_))));
        assert!(matches!(
            Client::builder("k").model("").build().err(),
            Some(Error::Config(_))
        ));
    }

    #[test]
    fn builder_trims_base_url() {
        let client = Client::builder("k")
            .base_url("https://proxy.example.com/v1/")
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "https://proxy.example.com/v1");
    }
}
