//! Speech synthesis service.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{
    error::Result,
    http::{decode_hex_audio, HttpClient},
    task::Task,
    types::{AudioFormat, AudioInfo, BaseResp, OutputFormat},
};

/// Speech synthesis service.
pub struct SpeechService {
    http: Arc<HttpClient>,
}

impl SpeechService {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Performs synchronous speech synthesis.
    ///
    /// The returned audio data is automatically decoded from hex format. An
    /// accepted request may still carry no audio; callers decide whether
    /// that is retryable.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let request = SpeechRequest {
    ///     model: MODEL_SPEECH_02_HD.to_string(),
    ///     text: "こんにちは".to_string(),
    ///     voice_setting: Some(VoiceSetting {
    ///         voice_id: "male-qn-qingse".to_string(),
    ///         ..Default::default()
    ///     }),
    ///     ..Default::default()
    /// };
    ///
    /// let response = client.speech().synthesize(&request).await?;
    /// ```
    pub async fn synthesize(&self, request: &SpeechRequest) -> Result<SpeechResponse> {
        let api_resp: SpeechApiResponse = self
            .http
            .request("POST", "/v1/t2a_v2", Some(request))
            .await?;
        api_resp.into_response()
    }

    /// Creates an async long-text speech synthesis task.
    ///
    /// Poll the returned [`Task`] for completion; a successful task yields a
    /// file id whose download URL is resolved through the file service.
    pub async fn create_async_task(&self, request: &AsyncSpeechRequest) -> Result<Task> {
        #[derive(Deserialize)]
        struct Response {
            task_id: crate::types::FlexibleId,
            #[serde(default)]
            #[allow(dead_code)]
            base_resp: Option<BaseResp>,
        }

        let resp: Response = self
            .http
            .request("POST", "/v1/t2a_async", Some(request))
            .await?;

        Ok(Task::new(resp.task_id.0, self.http.clone()))
    }
}

// ==================== Request/Response Types ====================

/// Request for speech synthesis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeechRequest {
    /// Model version.
    pub model: String,

    /// Text to synthesize (max 10,000 characters).
    pub text: String,

    /// Streaming flag; this SDK only speaks the non-streaming protocol.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_setting: Option<VoiceSetting>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_setting: Option<AudioSetting>,

    /// Language boost for specific language pronunciation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_boost: Option<String>,

    /// Output format: hex or url.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_format: Option<OutputFormat>,
}

/// Request for async speech synthesis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AsyncSpeechRequest {
    pub model: String,

    /// Text to synthesize (max 1,000,000 characters).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_setting: Option<VoiceSetting>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_setting: Option<AudioSetting>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_boost: Option<String>,
}

/// Voice configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoiceSetting {
    /// Voice identifier.
    pub voice_id: String,

    /// Speech speed (0.5-2.0, default 1.0).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,

    /// Volume (0-10, default 1.0).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vol: Option<f64>,

    /// Pitch adjustment (-12 to 12, default 0).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch: Option<i32>,

    /// Emotion: happy, sad, angry, fearful, disgusted, surprised, neutral.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotion: Option<String>,
}

/// Audio configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AudioSetting {
    /// Sample rate: 8000, 16000, 22050, 24000, 32000, 44100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<i32>,

    /// Bitrate: 32000, 64000, 128000, 256000.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<AudioFormat>,

    /// Number of channels: 1 or 2.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<i32>,
}

/// Response from speech synthesis.
#[derive(Debug, Clone, Default)]
pub struct SpeechResponse {
    /// Decoded audio data; empty when the service returned no payload.
    pub audio: Vec<u8>,

    /// Audio URL (when output_format is "url").
    pub audio_url: Option<String>,

    /// Audio metadata.
    pub extra_info: Option<AudioInfo>,

    /// Request trace ID.
    pub trace_id: String,
}

// ==================== Internal Types ====================

#[derive(Deserialize)]
struct SpeechApiResponse {
    #[serde(default)]
    data: Option<SpeechData>,
    extra_info: Option<AudioInfo>,
    #[serde(default)]
    trace_id: String,
}

#[derive(Deserialize)]
struct SpeechData {
    #[serde(default)]
    audio: String,
    #[serde(default)]
    audio_url: Option<String>,
}

impl SpeechApiResponse {
    fn into_response(self) -> Result<SpeechResponse> {
        let mut response = SpeechResponse {
            audio: Vec::new(),
            audio_url: None,
            extra_info: self.extra_info,
            trace_id: self.trace_id,
        };

        if let Some(data) = self.data {
            response.audio_url = data.audio_url;
            if !data.audio.is_empty() {
                response.audio = decode_hex_audio(&data.audio)?;
            }
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_decodes_hex_audio() {
        let raw = r#"{
            "data": {"audio": "494433", "status": 2},
            "extra_info": {"audio_length": 2300, "audio_format": "mp3"},
            "trace_id": "t-1",
            "base_resp": {"status_code": 0, "status_msg": "success"}
        }"#;
        let api: SpeechApiResponse = serde_json::from_str(raw).unwrap();
        let resp = api.into_response().unwrap();
        assert_eq!(resp.audio, b"ID3".to_vec());
        assert_eq!(resp.extra_info.unwrap().audio_length, 2300);
        assert_eq!(resp.trace_id, "t-1");
    }

    #[test]
    fn response_without_data_has_no_audio() {
        let api: SpeechApiResponse = serde_json::from_str(r#"{"trace_id":"x"}"#).unwrap();
        let resp = api.into_response().unwrap();
        assert!(resp.audio.is_empty());
        assert!(resp.extra_info.is_none());
    }

    #[test]
    fn request_serializes_only_set_fields() {
        let req = SpeechRequest {
            model: "speech-02-hd".into(),
            text: "こんにちは".into(),
            stream: Some(false),
            voice_setting: Some(VoiceSetting {
                voice_id: "male-qn-qingse".into(),
                speed: Some(1.0),
                ..Default::default()
            }),
            audio_setting: Some(AudioSetting {
                format: Some(AudioFormat::Mp3),
                channel: Some(1),
                ..Default::default()
            }),
            ..Default::default()
        };
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["stream"], false);
        assert_eq!(v["voice_setting"]["voice_id"], "male-qn-qingse");
        assert!(v["voice_setting"].get("pitch").is_none());
        assert_eq!(v["audio_setting"]["format"], "mp3");
        assert!(v.get("output_format").is_none());
    }
}
