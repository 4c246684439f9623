//! Chat completion request/response types.

use serde::{Deserialize, Serialize};

/// Request for chat completion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,

    pub messages: Vec<Message>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Sampling temperature (0-2).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

/// A chat message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Message {
    /// Message role: system, user, assistant.
    pub role: String,

    #[serde(default)]
    pub content: Option<String>,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: Some(content.into()),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: Some(content.into()),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: Some(content.into()),
        }
    }
}

/// Response from chat completion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

impl ChatCompletionResponse {
    /// Returns the content of the first choice, if it is non-empty.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .filter(|s| !s.trim().is_empty())
    }
}

/// A completion choice.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub index: i32,
    pub message: Message,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Token usage information.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: i64,
    pub completion_tokens: i64,
    pub total_tokens: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_content_skips_blank() {
        let raw = r#"{"id":"c1","model":"gpt-4o","choices":[{"index":0,"message":{"role":"assistant","content":"  "}}]}"#;
        let resp: ChatCompletionResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.first_content(), None);

        let raw = r#"{"choices":[{"message":{"role":"assistant","content":"**アキラ:** こんにちは"}}]}"#;
        let resp: ChatCompletionResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.first_content(), Some("**アキラ:** こんにちは"));
    }

    #[test]
    fn no_choices_means_no_content() {
        let resp: ChatCompletionResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.first_content().is_none());
    }

    #[test]
    fn request_omits_unset_options() {
        let req = ChatCompletionRequest {
            model: "gpt-4o".into(),
            messages: vec![Message::system("s"), Message::user("u")],
            max_tokens: Some(2000),
            temperature: None,
        };
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["max_tokens"], 2000);
        assert!(v.get("temperature").is_none());
        assert_eq!(v["messages"][0]["role"], "system");
    }
}
