//! Per-segment speech synthesis with retry and voice fallback.

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use podgen_minimax::AudioFormat;
use tracing::{debug, info, warn};

use super::{
    retry::RetryPolicy,
    script::estimate_seconds,
    service::SpeechBackend,
    voice::FALLBACK_VOICE_ID,
};

/// Prefix of audio data URIs handed to clients.
/// Encodes `audio` as an mp3 data URI.
pub fn audio_data_uri(audio: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        AudioFormat::Mp3.mime_type(),
        STANDARD.encode(audio)
    )
}

/// Decodes the payload of a base64 data URI.
pub fn decode_data_uri(uri: &str) -> Option<Vec<u8>> {
    let (_, payload) = uri.split_once(',')?;
    STANDARD.decode(payload).ok()
}

/// Audio produced for one segment.
#[derive(Debug, Clone)]
pub struct SynthesizedClip {
    pub audio: Vec<u8>,
    /// Whole seconds, rounded up.
    pub duration: u64,
    /// Voice that actually produced the clip.
    pub voice_id: String,
}

/// Result of synthesizing one segment. Never an error: every failure is
/// folded into [`SynthesisOutcome::Failed`].
#[derive(Debug, Clone)]
pub enum SynthesisOutcome {
    Audio(SynthesizedClip),
    Failed { reason: String },
}

/// Duration of a clip from the service-reported milliseconds, or estimated
/// from the text when the service reported nothing.
pub fn clip_duration(duration_ms: Option<i64>, text: &str) -> u64 {
    match duration_ms {
        Some(ms) if ms > 0 => (ms as u64).div_ceil(1000),
        _ => estimate_seconds(text),
    }
}

/// Synthesizes text with a primary voice, then a fallback voice, each
/// under the same retry policy.
pub struct Synthesizer {
    backend: Arc<dyn SpeechBackend>,
    policy: RetryPolicy,
    fallback_voice: String,
}

impl Synthesizer {
    pub fn new(backend: Arc<dyn SpeechBackend>) -> Self {
        Self {
            backend,
            policy: RetryPolicy::SYNTHESIS,
            fallback_voice: FALLBACK_VOICE_ID.to_string(),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Synthesizes `text` for segment `seq`.
    pub async fn synthesize(&self, text: &str, voice_id: &str, seq: usize) -> SynthesisOutcome {
        if let Some(clip) = self.try_voice(text, voice_id, seq).await {
            return SynthesisOutcome::Audio(clip);
        }

        if voice_id != self.fallback_voice {
            warn!(
                seq,
                voice_id,
                fallback = %self.fallback_voice,
                "primary voice failed, trying fallback"
            );
            if let Some(clip) = self.try_voice(text, &self.fallback_voice, seq).await {
                return SynthesisOutcome::Audio(clip);
            }
        }

        SynthesisOutcome::Failed {
            reason: format!("no audio after {} attempts per voice", self.policy.max_attempts),
        }
    }

    async fn try_voice(&self, text: &str, voice_id: &str, seq: usize) -> Option<SynthesizedClip> {
        self.policy
            .retry(|attempt| async move {
                debug!(seq, attempt, voice_id, "synthesis request");
                match self.backend.synthesize(text, voice_id).await {
                    Ok(clip) if !clip.audio.is_empty() => {
                        info!(
                            seq,
                            attempt,
                            voice_id,
                            bytes = clip.audio.len(),
                            "segment synthesized"
                        );
                        Some(SynthesizedClip {
                            duration: clip_duration(clip.duration_ms, text),
                            audio: clip.audio,
                            voice_id: voice_id.to_string(),
                        })
                    }
                    Ok(_) => {
                        debug!(seq, attempt, voice_id, "response carried no audio");
                        None
                    }
                    Err(e) => {
                        warn!(seq, attempt, voice_id, error = %e, "synthesis attempt failed");
                        None
                    }
                }
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::Error, service::SpeechClip};
    use async_trait::async_trait;
    use tokio::sync::Mutex;

    struct MockBackend {
        calls: Mutex<Vec<String>>,
        responses: Mutex<Vec<crate::error::Result<SpeechClip>>>,
    }

    impl MockBackend {
        fn new(responses: Vec<crate::error::Result<SpeechClip>>) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                responses: Mutex::new(responses),
            })
        }
    }

    #[async_trait]
    impl SpeechBackend for MockBackend {
        async fn synthesize(
            &self,
            _text: &str,
            voice_id: &str,
        ) -> crate::error::Result<SpeechClip> {
            self.calls.lock().await.push(voice_id.to_string());
            let mut responses = self.responses.lock().await;
            if responses.is_empty() {
                Ok(SpeechClip::default())
            } else {
                responses.remove(0)
            }
        }
    }

    #[test]
    fn data_uri_round_trip() {
        let uri = audio_data_uri(b"ID3\x01");
        assert!(uri.starts_with("data:audio/mp3;base64,"));
        assert_eq!(decode_data_uri(&uri).unwrap(), b"ID3\x01");
        assert!(decode_data_uri("no-comma").is_none());
    }

    #[test]
    fn duration_prefers_reported_length() {
        assert_eq!(clip_duration(Some(2300), "x"), 3);
        assert_eq!(clip_duration(Some(0), "あいうえおかきくけこ"), 2);
        assert_eq!(clip_duration(None, "あいうえおか"), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_payload_exhausts_primary_then_fallback() {
        let backend = MockBackend::new(vec![]);
        let synth = Synthesizer::new(backend.clone());

        let outcome = synth.synthesize("こんにちは、皆さん。", "voice-a", 1).await;
        assert!(matches!(outcome, SynthesisOutcome::Failed { .. }));

        let calls = backend.calls.lock().await;
        assert_eq!(calls.len(), 10);
        assert!(calls[..5].iter().all(|v| v == "voice-a"));
        assert!(calls[5..].iter().all(|v| v == FALLBACK_VOICE_ID));
    }

    #[tokio::test(start_paused = true)]
    async fn fallback_voice_is_not_retried_twice() {
        let backend = MockBackend::new(vec![]);
        let synth = Synthesizer::new(backend.clone());

        synth.synthesize("こんにちは、皆さん。", FALLBACK_VOICE_ID, 1).await;
        assert_eq!(backend.calls.lock().await.len(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn errors_are_retried_until_audio_arrives() {
        let backend = MockBackend::new(vec![
            Err(Error::upstream("minimax", "rate limited")),
            Ok(SpeechClip::default()),
            Ok(SpeechClip {
                audio: vec![1, 2, 3],
                duration_ms: Some(1500),
            }),
        ]);
        let synth = Synthesizer::new(backend.clone());

        match synth.synthesize("テキストです。", "voice-a", 2).await {
            SynthesisOutcome::Audio(clip) => {
                assert_eq!(clip.audio, vec![1, 2, 3]);
                assert_eq!(clip.duration, 2);
                assert_eq!(clip.voice_id, "voice-a");
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert_eq!(backend.calls.lock().await.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn fallback_voice_rescues_segment() {
        let mut responses: Vec<crate::error::Result<SpeechClip>> =
            (0..5).map(|_| Ok(SpeechClip::default())).collect();
        responses.push(Ok(SpeechClip {
            audio: vec![9],
            duration_ms: None,
        }));
        let backend = MockBackend::new(responses);
        let synth = Synthesizer::new(backend.clone());

        match synth.synthesize("あいうえおかきくけこさ", "voice-a", 3).await {
            SynthesisOutcome::Audio(clip) => {
                assert_eq!(clip.voice_id, FALLBACK_VOICE_ID);
                assert_eq!(clip.duration, 3);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}
