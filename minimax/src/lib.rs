//! MiniMax API SDK for Rust.
//!
//! Covers the speech surface podgen talks to: synchronous T2A v2
//! synthesis, async long-text tasks, file download URLs and voice listing.

mod client;
mod error;
mod file;
pub mod http;
mod models;
mod speech;
mod task;
mod types;
mod voice;

pub use client::{Client, ClientBuilder, BASE_URL_GLOBAL, BASE_URL_IO, DEFAULT_BASE_URL};
pub use error::{status_code, Error, Result};
pub use file::FileService;
pub use models::*;
pub use speech::{
    AsyncSpeechRequest, AudioSetting, SpeechRequest, SpeechResponse, SpeechService, VoiceSetting,
};
pub use task::{Task, TaskStatusResponse};
pub use types::{AudioFormat, AudioInfo, FlexibleId, OutputFormat, TaskStatus, VoiceType};
pub use voice::{VoiceInfo, VoiceListResponse, VoiceService};
