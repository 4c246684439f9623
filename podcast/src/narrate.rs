//! Single-host narration with long-text speech.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::{
    error::Result,
    prompt,
    retry::RetryPolicy,
    service::{ChatModel, LongformSpeech},
    voice::{resolve_narrator_voice, VoiceResolution},
};

/// A narrated script and, when speech is enabled, its audio task.
#[derive(Debug, Clone)]
pub struct Narration {
    pub script: String,
    pub voice: VoiceResolution,
    pub task_id: Option<String>,
    pub audio_url: Option<String>,
}

/// Writes single-host scripts and voices them as long-text tasks.
pub struct Narrator {
    llm: Arc<dyn ChatModel>,
    speech: Option<Arc<dyn LongformSpeech>>,
    poll: RetryPolicy,
}

impl Narrator {
    pub fn new(llm: Arc<dyn ChatModel>) -> Self {
        Self {
            llm,
            speech: None,
            poll: RetryPolicy::TASK_POLL,
        }
    }

    pub fn with_speech(mut self, speech: Arc<dyn LongformSpeech>) -> Self {
        self.speech = Some(speech);
        self
    }

    pub fn with_poll_policy(mut self, poll: RetryPolicy) -> Self {
        self.poll = poll;
        self
    }

    /// Narrates `content`. Speech failures leave `audio_url` empty and never
    /// fail the call.
    pub async fn narrate(&self, content: &str, style: &str, voice: &str) -> Result<Narration> {
        let script = self
            .llm
            .complete(&prompt::narration(content, style, voice)?)
            .await?;
        info!(len = script.chars().count(), "narration script generated");

        let resolution = resolve_narrator_voice(voice, style);
        let (task_id, audio_url) = match &self.speech {
            Some(speech) => self.voice_script(speech.as_ref(), &script, resolution.voice_id).await,
            None => (None, None),
        };

        Ok(Narration {
            script,
            voice: resolution,
            task_id,
            audio_url,
        })
    }

    async fn voice_script(
        &self,
        speech: &dyn LongformSpeech,
        script: &str,
        voice_id: &str,
    ) -> (Option<String>, Option<String>) {
        let task_id = match speech.submit(script, voice_id).await {
            Ok(id) => id,
            Err(e) => {
                warn!(voice_id, error = %e, "speech task submission failed");
                return (None, None);
            }
        };
        info!(task_id = %task_id, voice_id, "speech task created");

        let id = task_id.as_str();
        let audio_url = self
            .poll
            .poll(|attempt| async move {
                match speech.status(id).await {
                    Ok(report) if report.status.is_success() && report.audio_url.is_some() => {
                        Some(report.audio_url)
                    }
                    Ok(report) if report.status.is_failed() => {
                        warn!(task_id = id, error = ?report.error_message, "speech task failed");
                        Some(None)
                    }
                    Ok(report) => {
                        debug!(
                            task_id = id,
                            attempt,
                            status = report.status.as_str(),
                            "speech task pending"
                        );
                        None
                    }
                    Err(e) => {
                        warn!(task_id = id, attempt, error = %e, "speech task status failed");
                        None
                    }
                }
            })
            .await
            .flatten();

        if audio_url.is_none() {
            info!(task_id = %task_id, "speech task produced no audio, returning script only");
        }
        (Some(task_id), audio_url)
    }
}
