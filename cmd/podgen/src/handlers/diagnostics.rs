//! Diagnostic endpoints.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use podgen::{
    narrator_voice_mapping, resolve_narrator_voice, SpeechBackend, VOICE_JA_FEMALE,
    VOICE_JA_MALE_NARRATOR,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};

use super::timestamp;
use crate::state::AppState;

/// `GET /healthz`
pub async fn healthz() -> Json<Value> {
    Json(json!({ "success": true, "status": "ok" }))
}

#[derive(Debug, Deserialize)]
pub struct VoiceQuery {
    #[serde(default = "default_voice")]
    pub voice: String,
    #[serde(default = "default_style")]
    pub style: String,
}

fn default_voice() -> String {
    "female".to_string()
}

fn default_style() -> String {
    "educational".to_string()
}

/// `GET /test-voice-id?voice=&style=`
pub async fn test_voice_id(Query(q): Query<VoiceQuery>) -> Json<Value> {
    let resolution = resolve_narrator_voice(&q.voice, &q.style);
    info!(voice = %q.voice, style = %q.style, voice_id = resolution.voice_id, "voice id resolved");
    Json(json!({
        "success": true,
        "input": { "voice": q.voice, "style": q.style },
        "output": {
            "voiceId": resolution.voice_id,
            "isValid": !resolution.voice_id.is_empty(),
            "isFromMapping": resolution.from_mapping,
            "mapping": narrator_voice_mapping(),
        },
        "timestamp": timestamp(),
    }))
}

const SPEECH_SAMPLES: [(&str, &str, &str); 2] = [
    (
        "こんにちは、皆さん。今日は素晴らしい一日ですね。",
        VOICE_JA_FEMALE,
        "女性语音测试",
    ),
    (
        "はい、そうですね。今日のテーマについて話し合いましょう。",
        VOICE_JA_MALE_NARRATOR,
        "男性语音测试",
    ),
];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechCheck {
    pub test_number: usize,
    pub description: &'static str,
    pub text: &'static str,
    pub voice_id: &'static str,
    pub start_time: String,
    pub end_time: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_bytes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechConfig {
    pub api_host: String,
    pub api_key_exists: bool,
    pub api_key_preview: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub success_rate: String,
}

#[derive(Debug, Serialize)]
pub struct SpeechReport {
    pub timestamp: String,
    pub config: SpeechConfig,
    pub tests: Vec<SpeechCheck>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<SpeechSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// `GET /test-minimax`: synthesizes two fixed sentences.
pub async fn test_minimax(State(state): State<AppState>) -> Response {
    let mut report = SpeechReport {
        timestamp: timestamp(),
        config: SpeechConfig {
            api_host: state.minimax_host.clone(),
            api_key_exists: state.tts.is_some(),
            api_key_preview: state
                .tts
                .as_ref()
                .map(|t| t.api_key_preview.clone())
                .unwrap_or_else(|| "未设置".to_string()),
        },
        tests: Vec::new(),
        summary: None,
        error: None,
    };

    let Some(tts) = &state.tts else {
        report.error = Some("未找到MINIMAX_API_KEY环境变量".to_string());
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(report)).into_response();
    };

    for (i, (text, voice_id, description)) in SPEECH_SAMPLES.into_iter().enumerate() {
        report
            .tests
            .push(check_voice(tts.speech.as_ref(), i + 1, text, voice_id, description).await);
    }

    let total = report.tests.len();
    let successful = report.tests.iter().filter(|t| t.success).count();
    report.summary = Some(SpeechSummary {
        total,
        successful,
        failed: total - successful,
        success_rate: format!("{:.1}%", successful as f64 * 100.0 / total as f64),
    });
    info!(successful, total, "speech check finished");
    Json(report).into_response()
}

async fn check_voice(
    speech: &dyn SpeechBackend,
    test_number: usize,
    text: &'static str,
    voice_id: &'static str,
    description: &'static str,
) -> SpeechCheck {
    let start_time = timestamp();
    let result = speech.synthesize(text, voice_id).await;
    let mut check = SpeechCheck {
        test_number,
        description,
        text,
        voice_id,
        start_time,
        end_time: timestamp(),
        success: false,
        audio_bytes: None,
        duration_ms: None,
        error: None,
    };
    match result {
        Ok(clip) if !clip.audio.is_empty() => {
            check.success = true;
            check.audio_bytes = Some(clip.audio.len());
            check.duration_ms = clip.duration_ms;
        }
        Ok(_) => check.error = Some("response carried no audio".to_string()),
        Err(e) => {
            warn!(test_number, voice_id, error = %e, "speech check failed");
            check.error = Some(e.to_string());
        }
    }
    check
}
