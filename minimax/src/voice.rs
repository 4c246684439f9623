//! Voice listing service.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{
    error::Result,
    http::HttpClient,
    types::VoiceType,
};

/// Voice listing service.
pub struct VoiceService {
    http: Arc<HttpClient>,
}

impl VoiceService {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Lists available voices.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let voices = client.voice().list(None).await?;
    ///
    /// for voice in voices.all_voices() {
    ///     println!("{}: {} ({:?})", voice.voice_id, voice.voice_name, voice.voice_type);
    /// }
    /// ```
    pub async fn list(&self, voice_type: Option<VoiceType>) -> Result<VoiceListResponse> {
        #[derive(Serialize)]
        struct Request {
            voice_type: &'static str,
        }

        let vt = match voice_type {
            Some(VoiceType::System) => "system",
            Some(VoiceType::VoiceCloning) => "voice_cloning",
            Some(VoiceType::VoiceGeneration) => "voice_generation",
            _ => "all",
        };

        // base_resp is checked by the transport; the groups deserialize as-is.
        self.http
            .request("POST", "/v1/get_voice", Some(&Request { voice_type: vt }))
            .await
    }
}

/// Response containing available voices.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoiceListResponse {
    #[serde(default)]
    pub system_voice: Vec<VoiceInfo>,

    #[serde(default)]
    pub voice_cloning: Vec<VoiceInfo>,

    #[serde(default)]
    pub voice_generation: Vec<VoiceInfo>,
}

impl VoiceListResponse {
    /// Returns all voices combined into a single vector with type field set.
    pub fn all_voices(&self) -> Vec<VoiceInfo> {
        let tagged = |voices: &[VoiceInfo], vt: VoiceType| {
            voices
                .iter()
                .cloned()
                .map(move |mut v| {
                    v.voice_type = Some(vt);
                    v
                })
                .collect::<Vec<_>>()
        };

        let mut all = tagged(&self.system_voice, VoiceType::System);
        all.extend(tagged(&self.voice_cloning, VoiceType::VoiceCloning));
        all.extend(tagged(&self.voice_generation, VoiceType::VoiceGeneration));
        all
    }
}

/// Information about a voice.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoiceInfo {
    pub voice_id: String,

    #[serde(default)]
    pub voice_name: String,

    #[serde(skip_serializing_if = "Option::is_none", rename = "type")]
    pub voice_type: Option<VoiceType>,

    #[serde(default)]
    pub description: Vec<String>,

    #[serde(default)]
    pub created_time: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_voices_tags_each_group() {
        let list = VoiceListResponse {
            system_voice: vec![VoiceInfo {
                voice_id: "male-qn-qingse".into(),
                ..Default::default()
            }],
            voice_cloning: vec![VoiceInfo {
                voice_id: "moss_audio_1".into(),
                ..Default::default()
            }],
            voice_generation: vec![],
        };
        let all = list.all_voices();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].voice_type, Some(VoiceType::System));
        assert_eq!(all[1].voice_type, Some(VoiceType::VoiceCloning));
    }
}
