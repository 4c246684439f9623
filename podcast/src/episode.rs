//! Two-host podcast episodes: script, dialogue, audio.

use std::sync::Arc;

use tracing::{info, warn};

use super::{
    error::{Error, Result},
    merge::AudioMerger,
    orchestrator::{SegmentOrchestrator, SynthesisReport},
    prompt,
    script::{DialogueSegment, ScriptParser},
    service::ChatModel,
    voice::VoiceRoster,
};

/// Source content shorter than this cannot carry an episode.
pub const MIN_SOURCE_CHARS: usize = 100;

/// Audio side of an episode.
#[derive(Debug, Clone)]
pub enum EpisodeAudio {
    /// Synthesis was not attempted; holds the reason.
    Skipped(String),
    Voiced {
        report: SynthesisReport,
        /// Merged audio of all voiced segments, as a data URI.
        final_audio: Option<String>,
    },
}

/// A produced episode.
#[derive(Debug, Clone)]
pub struct Episode {
    pub script: String,
    pub dialogue: Vec<DialogueSegment>,
    pub audio: EpisodeAudio,
}

struct Voicing {
    orchestrator: SegmentOrchestrator,
    merger: AudioMerger,
}

/// Produces two-host episodes from source content.
pub struct Podcaster {
    llm: Arc<dyn ChatModel>,
    roster: VoiceRoster,
    parser: ScriptParser,
    voicing: Option<Voicing>,
}

impl Podcaster {
    pub fn new(llm: Arc<dyn ChatModel>, roster: VoiceRoster) -> Result<Self> {
        let parser = ScriptParser::new(&roster)?;
        Ok(Self {
            llm,
            roster,
            parser,
            voicing: None,
        })
    }

    /// Enables audio. Without it episodes are script-only.
    pub fn with_voicing(mut self, orchestrator: SegmentOrchestrator, merger: AudioMerger) -> Self {
        self.voicing = Some(Voicing {
            orchestrator,
            merger,
        });
        self
    }

    pub fn roster(&self) -> &VoiceRoster {
        &self.roster
    }

    pub fn is_voiced(&self) -> bool {
        self.voicing.is_some()
    }

    /// Generates a dialogue script for `content`.
    pub async fn write_script(&self, content: &str) -> Result<String> {
        let script = self
            .llm
            .complete(&prompt::dialogue(&self.roster, content)?)
            .await?;
        info!(len = script.chars().count(), "dialogue script generated");
        Ok(script)
    }

    /// Writes, parses and (when enabled) voices an episode.
    ///
    /// Fails only before synthesis starts; segment failures are reported in
    /// the returned [`EpisodeAudio`].
    pub async fn produce(&self, content: &str) -> Result<Episode> {
        let script = self.write_script(content).await?;

        let dialogue = match self.parser.parse_required(&script) {
            Ok(dialogue) => dialogue,
            Err(e) => {
                if let Error::NoDialogue { preview, .. } = &e {
                    warn!(%preview, "script has no dialogue lines");
                }
                return Err(e);
            }
        };
        info!(segments = dialogue.len(), "dialogue parsed");

        let audio = match &self.voicing {
            None => EpisodeAudio::Skipped("MINIMAX_API_KEY未配置".to_string()),
            Some(voicing) => {
                let report = voicing.orchestrator.run(&dialogue).await;
                let final_audio = if report.successes > 0 {
                    voicing.merger.merge_report(&report).await
                } else {
                    None
                };
                EpisodeAudio::Voiced {
                    report,
                    final_audio,
                }
            }
        };

        Ok(Episode {
            script,
            dialogue,
            audio,
        })
    }
}
