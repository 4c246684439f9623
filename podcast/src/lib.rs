//! Japanese two-host podcast generation.
//!
//! The pipeline turns source content into an LLM-written dialogue between
//! two hosts, parses it into speaker segments, voices each segment with
//! retry and voice fallback, and merges the clips into one episode.
//!
//! Remote services sit behind the traits in [`service`]; [`backends`]
//! adapts MiniMax, OpenAI-compatible chat and the web scraper to them.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use podgen::{backends::{MinimaxSpeech, OpenAiChat}, *};
//!
//! let llm = Arc::new(OpenAiChat::new(podgen_openai::Client::new(openai_key)?));
//! let speech = Arc::new(MinimaxSpeech::new(Arc::new(podgen_minimax::Client::new(minimax_key)?)));
//! let orchestrator = SegmentOrchestrator::new(Arc::new(Synthesizer::new(speech)));
//!
//! let podcaster = Podcaster::new(llm, VoiceRoster::default())?
//!     .with_voicing(orchestrator, AudioMerger::detect(None));
//! let episode = podcaster.produce(&article).await?;
//! ```

mod acquire;
pub mod backends;
mod episode;
mod error;
mod merge;
mod narrate;
mod orchestrator;
pub mod prompt;
mod retry;
mod script;
pub mod service;
mod synth;
mod voice;

pub use acquire::ContentAcquirer;
pub use episode::{Episode, EpisodeAudio, Podcaster, MIN_SOURCE_CHARS};
pub use error::{Error, Result};
pub use merge::AudioMerger;
pub use narrate::{Narration, Narrator};
pub use orchestrator::{
    AudioSegmentResult, SegmentOrchestrator, SegmentSynthesizer, SynthesisReport, DEFAULT_PACING,
};
pub use retry::RetryPolicy;
pub use script::{
    estimate_seconds, preview, DialogueSegment, ScriptParser, CHARS_PER_SECOND, PREVIEW_CHARS,
};
pub use service::{
    ChatModel, Completion, LongformSpeech, PageScraper, SpeechBackend, SpeechClip, TaskReport,
    VoiceCatalog,
};
pub use synth::{
    audio_data_uri, decode_data_uri, SynthesisOutcome, SynthesizedClip, Synthesizer,
};
pub use voice::{
    narrator_voice_mapping, resolve_narrator_voice, Gender, PresetVoice, Speaker, VoiceCharacter,
    VoiceResolution, VoiceRoster, FALLBACK_VOICE_ID, NARRATION_STYLES, PRESET_VOICES,
    VOICE_JA_FEMALE, VOICE_JA_MALE_HOST, VOICE_JA_MALE_NARRATOR,
};
