use axum::{extract::rejection::JsonRejection, extract::State, Json};
use podgen::estimate_seconds;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{required, timestamp};
use crate::{error::ApiError, state::AppState};

fn default_style() -> String {
    "educational".to_string()
}

fn default_voice() -> String {
    "female".to_string()
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default = "default_style")]
    pub style: String,
    #[serde(default = "default_voice")]
    pub voice: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub success: bool,
    pub script: String,
    pub audio_url: Option<String>,
    pub task_id: Option<String>,
    pub word_count: usize,
    /// Estimated seconds.
    pub duration: u64,
    pub style: String,
    pub voice: String,
    pub metadata: GenerateMetadata,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateMetadata {
    pub content_length: usize,
    pub script_length: usize,
    pub has_audio: bool,
    pub is_async_task: bool,
    pub language: &'static str,
    pub voice_id: &'static str,
    pub generated_at: String,
}

/// `POST /generate`: single-host script plus long-text audio.
pub async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let Json(req) = payload?;
    let content =
        required(req.content.as_deref()).ok_or_else(|| ApiError::bad_request("请提供内容"))?;
    let narrator = state.narrator()?;
    info!(
        style = %req.style,
        voice = %req.voice,
        len = content.chars().count(),
        "narration requested"
    );

    let narration = narrator
        .narrate(content, &req.style, &req.voice)
        .await
        .map_err(|e| match e {
            podgen::Error::EmptyResponse(_) => ApiError::internal("未能生成播客脚本"),
            podgen::Error::Upstream { .. } => {
                ApiError::internal("OpenAI API调用失败").with_details(e)
            }
            e => ApiError::internal("播客生成失败").with_details(e),
        })?;

    let word_count = narration.script.chars().count();
    info!(has_audio = narration.audio_url.is_some(), "narration finished");
    Ok(Json(GenerateResponse {
        success: true,
        word_count,
        duration: estimate_seconds(&narration.script),
        metadata: GenerateMetadata {
            content_length: content.chars().count(),
            script_length: word_count,
            has_audio: narration.audio_url.is_some(),
            is_async_task: narration.task_id.is_some(),
            language: "japanese",
            voice_id: narration.voice.voice_id,
            generated_at: timestamp(),
        },
        script: narration.script,
        audio_url: narration.audio_url,
        task_id: narration.task_id,
        style: req.style,
        voice: req.voice,
    }))
}
