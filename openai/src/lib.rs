//! OpenAI-compatible chat completion client.
//!
//! Only the non-streaming `/chat/completions` call is implemented; any
//! endpoint speaking the same protocol can be targeted via the base URL.

mod chat;
mod client;
mod error;

pub use chat::{ChatCompletionRequest, ChatCompletionResponse, Choice, Message, Usage};
pub use client::{Client, ClientBuilder, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use error::{Error, Result};
