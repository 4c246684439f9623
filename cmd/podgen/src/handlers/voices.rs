use axum::{extract::State, Json};
use podgen::PRESET_VOICES;
use podgen_minimax::VoiceInfo;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::{error::ApiError, state::AppState};

/// `GET /voices`: the upstream listing, or presets when it is unavailable.
pub async fn voices(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let tts = state.tts()?;
    match tts.catalog.list_voices().await {
        Ok(listing) => {
            let voices: Vec<VoiceInfo> = listing.all_voices();
            debug!(count = voices.len(), "voices listed");
            Ok(Json(json!({
                "success": true,
                "voices": voices,
                "raw_response": listing,
            })))
        }
        Err(e) => {
            warn!(error = %e, "voice listing failed, returning presets");
            Ok(Json(json!({
                "success": true,
                "voices": [],
                "message": "API调用失败，使用预设语音选项",
                "defaultVoices": PRESET_VOICES,
            })))
        }
    }
}
