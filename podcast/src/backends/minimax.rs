use std::sync::Arc;

use async_trait::async_trait;
use podgen_minimax as minimax;

use crate::{
    error::Result,
    service::{LongformSpeech, SpeechBackend, SpeechClip, TaskReport, VoiceCatalog},
};

/// MiniMax speech: T2A v2 for segments, async tasks for long text.
pub struct MinimaxSpeech {
    client: Arc<minimax::Client>,
    model: String,
}

impl MinimaxSpeech {
    pub fn new(client: Arc<minimax::Client>) -> Self {
        Self {
            client,
            model: minimax::MODEL_SPEECH_02_HD.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn client(&self) -> &minimax::Client {
        &self.client
    }

    fn voice_setting(voice_id: &str, emotion: Option<&str>) -> minimax::VoiceSetting {
        minimax::VoiceSetting {
            voice_id: voice_id.to_string(),
            speed: Some(1.0),
            vol: Some(1.0),
            pitch: Some(0),
            emotion: emotion.map(str::to_string),
        }
    }

    fn audio_setting() -> minimax::AudioSetting {
        minimax::AudioSetting {
            sample_rate: Some(32000),
            bitrate: Some(128000),
            format: Some(minimax::AudioFormat::Mp3),
            channel: Some(1),
        }
    }
}

#[async_trait]
impl SpeechBackend for MinimaxSpeech {
    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<SpeechClip> {
        let req = minimax::SpeechRequest {
            model: self.model.clone(),
            text: text.to_string(),
            stream: Some(false),
            voice_setting: Some(Self::voice_setting(voice_id, None)),
            audio_setting: Some(Self::audio_setting()),
            ..Default::default()
        };
        let resp = self.client.speech().synthesize(&req).await?;
        Ok(SpeechClip {
            audio: resp.audio,
            duration_ms: resp.extra_info.map(|info| info.audio_length).filter(|ms| *ms > 0),
        })
    }
}

#[async_trait]
impl LongformSpeech for MinimaxSpeech {
    async fn submit(&self, text: &str, voice_id: &str) -> Result<String> {
        let req = minimax::AsyncSpeechRequest {
            model: self.model.clone(),
            text: Some(text.to_string()),
            voice_setting: Some(Self::voice_setting(voice_id, Some(minimax::EMOTION_NEUTRAL))),
            audio_setting: Some(Self::audio_setting()),
            language_boost: Some(minimax::LANGUAGE_JAPANESE.to_string()),
        };
        let task = self.client.speech().create_async_task(&req).await?;
        Ok(task.id().to_string())
    }

    async fn status(&self, task_id: &str) -> Result<TaskReport> {
        let resp = self.client.task(task_id).status().await?;
        let audio_url = match resp.file_id.as_deref().filter(|id| !id.is_empty()) {
            Some(file_id) if resp.status.is_success() => {
                let url = self.client.file().get_download_url(file_id).await?;
                Some(url).filter(|u| !u.is_empty())
            }
            _ => None,
        };
        Ok(TaskReport {
            status: resp.status,
            audio_url,
            error_message: resp.error_message,
        })
    }
}

#[async_trait]
impl VoiceCatalog for MinimaxSpeech {
    async fn list_voices(&self) -> Result<minimax::VoiceListResponse> {
        Ok(self.client.voice().list(None).await?)
    }
}
