use axum::{extract::rejection::JsonRejection, extract::State, Json};
use podgen::{
    estimate_seconds, AudioSegmentResult, DialogueSegment, Episode, EpisodeAudio,
    SynthesisReport, VoiceRoster, MIN_SOURCE_CHARS,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use super::{required, scrape::invalid_url, timestamp};
use crate::{error::ApiError, state::AppState};

const CONTENT_TOO_SHORT: &str = "抓取的内容太短，无法生成播客";

#[derive(Debug, Deserialize)]
pub struct PodcastRequest {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PodcastResponse {
    pub success: bool,
    pub message: &'static str,
    pub script: String,
    pub word_count: usize,
    /// Seconds.
    pub total_duration: u64,
    pub dialogue_segments: Vec<DialogueSegment>,
    pub audio_segments: Vec<AudioSegmentResult>,
    pub final_audio_url: Option<String>,
    pub metadata: PodcastMetadata,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PodcastMetadata {
    pub source_url: String,
    pub content_length: usize,
    pub script_length: usize,
    pub total_segments: usize,
    pub audio_segments: usize,
    pub successful_audios: usize,
    pub generated_at: String,
    pub voice_characters: VoiceRoster,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// `POST /generate-podcast-from-url`: scrape, write, voice and merge.
pub async fn generate_podcast(
    State(state): State<AppState>,
    payload: Result<Json<PodcastRequest>, JsonRejection>,
) -> Result<Json<PodcastResponse>, ApiError> {
    let Json(req) = payload?;
    let url =
        required(req.url.as_deref()).ok_or_else(|| ApiError::bad_request("请提供URL"))?;
    info!(url, "podcast requested");

    let page = state.acquirer().acquire(url).await.map_err(acquire_error)?;
    let content_length = page.content.chars().count();
    if content_length < MIN_SOURCE_CHARS {
        return Err(ApiError::bad_request(CONTENT_TOO_SHORT));
    }
    info!(source = page.source.as_str(), len = content_length, "content acquired");

    let podcaster = state.podcaster()?;
    let episode = podcaster.produce(&page.content).await.map_err(script_error)?;

    Ok(Json(PodcastResponse::new(
        url,
        content_length,
        podcaster.roster().clone(),
        episode,
    )))
}

fn acquire_error(e: podgen::Error) -> ApiError {
    if let Some(err) = invalid_url(&e) {
        return err;
    }
    match e {
        podgen::Error::Scrape(podgen_scrape::Error::ContentTooShort { .. }) => {
            ApiError::bad_request(CONTENT_TOO_SHORT)
        }
        e => ApiError::internal("网页抓取失败").with_details(e),
    }
}

fn script_error(e: podgen::Error) -> ApiError {
    match e {
        podgen::Error::NoDialogue {
            script_len,
            preview,
        } => ApiError::internal("对话片段解析失败，未找到有效的对话内容").with_debug(json!({
            "scriptLength": script_len,
            "scriptPreview": preview,
        })),
        podgen::Error::EmptyResponse(_) => ApiError::internal("未能生成播客脚本"),
        e => ApiError::internal("脚本生成失败").with_details(e),
    }
}

impl PodcastResponse {
    fn new(url: &str, content_length: usize, roster: VoiceRoster, episode: Episode) -> Self {
        let Episode {
            script,
            dialogue,
            audio,
        } = episode;
        let script_length = script.chars().count();

        let (message, report, total_duration, final_audio_url, error) = match audio {
            EpisodeAudio::Skipped(reason) => {
                let report = SynthesisReport::unvoiced(&dialogue);
                (
                    "播客脚本生成完成（音频生成已跳过：API Key未配置）",
                    report,
                    estimate_seconds(&script),
                    None,
                    Some(reason),
                )
            }
            EpisodeAudio::Voiced {
                report,
                final_audio,
            } => {
                info!(
                    successes = report.successes,
                    total = report.segments.len(),
                    merged = final_audio.is_some(),
                    "podcast finished"
                );
                let total = report.total_duration;
                ("播客生成完成", report, total, final_audio, None)
            }
        };

        Self {
            success: true,
            message,
            word_count: script_length,
            total_duration,
            final_audio_url,
            metadata: PodcastMetadata {
                source_url: url.to_string(),
                content_length,
                script_length,
                total_segments: dialogue.len(),
                audio_segments: report.segments.len(),
                successful_audios: report.successes,
                generated_at: timestamp(),
                voice_characters: roster,
                error,
            },
            script,
            dialogue_segments: dialogue,
            audio_segments: report.segments,
        }
    }
}
