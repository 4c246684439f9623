use async_trait::async_trait;
use podgen_openai::{ChatCompletionRequest, Client, Message};

use crate::{
    error::Result,
    service::{ChatModel, Completion},
};

/// Chat completions through an OpenAI-compatible endpoint.
pub struct OpenAiChat {
    client: Client,
}

impl OpenAiChat {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn model(&self) -> &str {
        self.client.model()
    }
}

#[async_trait]
impl ChatModel for OpenAiChat {
    async fn complete(&self, request: &Completion) -> Result<String> {
        let req = ChatCompletionRequest {
            // Empty selects the client's configured model.
            model: String::new(),
            messages: vec![
                Message::system(request.system.as_str()),
                Message::user(request.user.as_str()),
            ],
            max_tokens: Some(request.max_tokens),
            temperature: Some(request.temperature),
        };
        Ok(self.client.complete(&req).await?)
    }
}
