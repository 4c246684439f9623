//! Shared, immutable per-process state.

use std::sync::Arc;

use podgen::{
    AudioMerger, ChatModel, ContentAcquirer, LongformSpeech, Narrator, PageScraper, Podcaster,
    SegmentOrchestrator, SpeechBackend, Synthesizer, VoiceCatalog, VoiceRoster,
};

use crate::error::ApiError;

/// The speech services, all backed by one TTS account.
#[derive(Clone)]
pub struct Tts {
    pub speech: Arc<dyn SpeechBackend>,
    pub longform: Arc<dyn LongformSpeech>,
    pub catalog: Arc<dyn VoiceCatalog>,
    pub api_key_preview: String,
}

impl Tts {
    pub fn new<S>(backend: Arc<S>, api_key_preview: String) -> Self
    where
        S: SpeechBackend + LongformSpeech + VoiceCatalog + 'static,
    {
        Self {
            speech: backend.clone(),
            longform: backend.clone(),
            catalog: backend,
            api_key_preview,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub llm: Option<Arc<dyn ChatModel>>,
    pub scraper: Arc<dyn PageScraper>,
    pub tts: Option<Tts>,
    pub merger: AudioMerger,
    pub roster: VoiceRoster,
    /// Reported by the speech diagnostics.
    pub minimax_host: String,
}

impl AppState {
    pub fn llm(&self) -> Result<Arc<dyn ChatModel>, ApiError> {
        self.llm
            .clone()
            .ok_or_else(|| ApiError::not_configured("OPENAI_API_KEY"))
    }

    pub fn tts(&self) -> Result<&Tts, ApiError> {
        self.tts
            .as_ref()
            .ok_or_else(|| ApiError::not_configured("MINIMAX_API_KEY"))
    }

    pub fn acquirer(&self) -> ContentAcquirer {
        ContentAcquirer::new(self.scraper.clone(), self.llm.clone())
            .with_roster(self.roster.clone())
    }

    pub fn narrator(&self) -> Result<Narrator, ApiError> {
        let narrator = Narrator::new(self.llm()?);
        Ok(match &self.tts {
            Some(tts) => narrator.with_speech(tts.longform.clone()),
            None => narrator,
        })
    }

    pub fn podcaster(&self) -> Result<Podcaster, ApiError> {
        let podcaster = Podcaster::new(self.llm()?, self.roster.clone())?;
        Ok(match &self.tts {
            Some(tts) => {
                let synthesizer = Synthesizer::new(tts.speech.clone());
                podcaster.with_voicing(
                    SegmentOrchestrator::new(Arc::new(synthesizer)),
                    self.merger.clone(),
                )
            }
            None => podcaster,
        })
    }
}
