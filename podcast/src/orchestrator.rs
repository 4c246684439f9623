//! Sequential synthesis over a whole dialogue.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use serde::Serialize;
use tokio::time::sleep;
use tracing::{info, warn};

use super::{
    error::Result,
    script::{estimate_seconds, DialogueSegment},
    synth::{audio_data_uri, SynthesisOutcome, Synthesizer},
};

/// Pause after every segment call, keeping under the TTS rate limit.
pub const DEFAULT_PACING: Duration = Duration::from_secs(1);

/// Synthesizes one dialogue segment.
#[async_trait]
pub trait SegmentSynthesizer: Send + Sync {
    async fn synthesize_segment(
        &self,
        segment: &DialogueSegment,
        seq: usize,
    ) -> Result<SynthesisOutcome>;
}

#[async_trait]
impl SegmentSynthesizer for Synthesizer {
    async fn synthesize_segment(
        &self,
        segment: &DialogueSegment,
        seq: usize,
    ) -> Result<SynthesisOutcome> {
        Ok(self.synthesize(&segment.text, &segment.voice_id, seq).await)
    }
}

/// Audio outcome of one dialogue segment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioSegmentResult {
    /// 1-based position in the dialogue.
    pub segment_id: usize,
    /// Display name of the speaker.
    pub speaker: String,
    pub text: String,
    /// `data:audio/mp3;base64,...`, or `None` when synthesis failed.
    pub audio_url: Option<String>,
    pub voice_id: String,
    /// Seconds.
    pub duration: u64,
    pub success: bool,
}

impl AudioSegmentResult {
    fn failed(seq: usize, segment: &DialogueSegment) -> Self {
        Self {
            segment_id: seq,
            speaker: segment.name.clone(),
            text: segment.text.clone(),
            audio_url: None,
            voice_id: segment.voice_id.clone(),
            duration: 0,
            success: false,
        }
    }

    /// A placeholder for a segment that was never voiced; the duration is
    /// estimated from the text.
    pub fn unvoiced(seq: usize, segment: &DialogueSegment) -> Self {
        Self {
            duration: estimate_seconds(&segment.text),
            ..Self::failed(seq, segment)
        }
    }
}

/// Ordered per-segment results plus totals.
#[derive(Debug, Clone, Default)]
pub struct SynthesisReport {
    pub segments: Vec<AudioSegmentResult>,
    /// Sum of segment durations, seconds.
    pub total_duration: u64,
    pub successes: usize,
    pub failures: usize,
}

impl SynthesisReport {
    pub fn from_segments(segments: Vec<AudioSegmentResult>) -> Self {
        let total_duration = segments.iter().map(|s| s.duration).sum();
        let successes = segments.iter().filter(|s| s.audio_url.is_some()).count();
        let failures = segments.len() - successes;
        Self {
            segments,
            total_duration,
            successes,
            failures,
        }
    }

    /// Results for a dialogue that is not voiced at all.
    pub fn unvoiced(dialogue: &[DialogueSegment]) -> Self {
        Self::from_segments(
            dialogue
                .iter()
                .enumerate()
                .map(|(i, seg)| AudioSegmentResult::unvoiced(i + 1, seg))
                .collect(),
        )
    }

    /// Segments that carry audio, in dialogue order.
    pub fn voiced(&self) -> impl Iterator<Item = &AudioSegmentResult> {
        self.segments.iter().filter(|s| s.audio_url.is_some())
    }
}

/// Drives a [`SegmentSynthesizer`] over a dialogue, one segment at a time.
pub struct SegmentOrchestrator {
    synthesizer: Arc<dyn SegmentSynthesizer>,
    pacing: Duration,
}

impl SegmentOrchestrator {
    pub fn new(synthesizer: Arc<dyn SegmentSynthesizer>) -> Self {
        Self {
            synthesizer,
            pacing: DEFAULT_PACING,
        }
    }

    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Synthesizes every segment in order. The report always has one
    /// result per input segment.
    pub async fn run(&self, dialogue: &[DialogueSegment]) -> SynthesisReport {
        let total = dialogue.len();
        let mut results = Vec::with_capacity(total);

        for (i, segment) in dialogue.iter().enumerate() {
            let seq = i + 1;
            info!(seq, total, speaker = %segment.name, "synthesizing segment");

            let result = match self.synthesizer.synthesize_segment(segment, seq).await {
                Ok(SynthesisOutcome::Audio(clip)) => AudioSegmentResult {
                    segment_id: seq,
                    speaker: segment.name.clone(),
                    text: segment.text.clone(),
                    audio_url: Some(audio_data_uri(&clip.audio)),
                    voice_id: clip.voice_id,
                    duration: clip.duration,
                    success: true,
                },
                Ok(SynthesisOutcome::Failed { reason }) => {
                    warn!(seq, %reason, "segment synthesis failed");
                    AudioSegmentResult::failed(seq, segment)
                }
                Err(e) => {
                    warn!(seq, error = %e, "segment synthesis errored");
                    AudioSegmentResult::failed(seq, segment)
                }
            };
            results.push(result);

            sleep(self.pacing).await;
        }

        let report = SynthesisReport::from_segments(results);
        info!(
            successes = report.successes,
            failures = report.failures,
            total_duration = report.total_duration,
            "dialogue synthesis finished"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::Error,
        synth::{decode_data_uri, SynthesizedClip},
        voice::Speaker,
    };

    struct FailAt {
        index: usize,
    }

    #[async_trait]
    impl SegmentSynthesizer for FailAt {
        async fn synthesize_segment(
            &self,
            segment: &DialogueSegment,
            seq: usize,
        ) -> Result<SynthesisOutcome> {
            if seq == self.index {
                return Err(Error::upstream("minimax", "connection reset"));
            }
            Ok(SynthesisOutcome::Audio(SynthesizedClip {
                audio: vec![seq as u8],
                duration: 2,
                voice_id: segment.voice_id.clone(),
            }))
        }
    }

    fn dialogue(n: usize) -> Vec<DialogueSegment> {
        (0..n)
            .map(|i| DialogueSegment {
                speaker: if i % 2 == 0 { Speaker::Akira } else { Speaker::Yuuki },
                name: if i % 2 == 0 { "アキラ" } else { "ユウキ" }.to_string(),
                text: format!("セリフ番号{}です。", i + 1),
                voice_id: format!("voice-{}", i % 2),
                emotion: "neutral".to_string(),
            })
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn error_keeps_its_position() {
        let orch = SegmentOrchestrator::new(Arc::new(FailAt { index: 2 }));
        let report = orch.run(&dialogue(4)).await;

        assert_eq!(report.segments.len(), 4);
        assert_eq!(report.successes, 3);
        assert_eq!(report.failures, 1);
        assert_eq!(report.total_duration, 6);

        let failed = &report.segments[1];
        assert_eq!(failed.segment_id, 2);
        assert!(failed.audio_url.is_none());
        assert_eq!(failed.duration, 0);
        assert!(!failed.success);
        assert_eq!(failed.speaker, "ユウキ");

        for (i, seg) in report.segments.iter().enumerate().filter(|(i, _)| *i != 1) {
            assert_eq!(seg.segment_id, i + 1);
            let audio = decode_data_uri(seg.audio_url.as_deref().unwrap()).unwrap();
            assert_eq!(audio, vec![(i + 1) as u8]);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn pacing_applies_after_every_segment() {
        let orch = SegmentOrchestrator::new(Arc::new(FailAt { index: 1 }));
        let start = tokio::time::Instant::now();
        orch.run(&dialogue(3)).await;
        assert_eq!(start.elapsed(), Duration::from_secs(3));
    }

    #[test]
    fn unvoiced_report_estimates_durations() {
        let report = SynthesisReport::unvoiced(&dialogue(2));
        assert_eq!(report.segments.len(), 2);
        assert_eq!(report.successes, 0);
        assert!(report.segments.iter().all(|s| s.audio_url.is_none()));
        assert_eq!(report.segments[0].duration, 2);
        assert_eq!(report.voiced().count(), 0);
    }

    #[test]
    fn result_serializes_camel_case() {
        let v = serde_json::to_value(AudioSegmentResult::unvoiced(1, &dialogue(1)[0])).unwrap();
        assert_eq!(v["segmentId"], 1);
        assert_eq!(v["voiceId"], "voice-0");
        assert!(v["audioUrl"].is_null());
    }
}
