//! Dialogue script parsing.
//!
//! Generated scripts are free text. Each host line looks like
//! `**アキラ:** ...`; emphasis around the name (before or after the
//! separator) is optional and the separator may be `:`, the full-width
//! `：` or `-`. Everything else (headings, narration, separators) is
//! dropped.

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    error::{Error, Result},
    voice::{Speaker, VoiceRoster},
};

/// Lines shorter than this are never dialogue.
const MIN_LINE_CHARS: usize = 10;

/// Utterances must be longer than this.
const MIN_TEXT_CHARS: usize = 5;

/// Characters of script kept in parse-failure diagnostics.
pub const PREVIEW_CHARS: usize = 500;

/// Japanese speech rate used for duration estimates.
pub const CHARS_PER_SECOND: usize = 5;

/// Default emotion tag of parsed segments.
pub const DEFAULT_EMOTION: &str = "neutral";

/// One host utterance, in speaking order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueSegment {
    pub speaker: Speaker,
    /// Display name of the speaker.
    pub name: String,
    pub text: String,
    pub voice_id: String,
    pub emotion: String,
}

/// Parses generated scripts into dialogue segments for a roster.
pub struct ScriptParser {
    patterns: Vec<(Regex, DialogueTemplate)>,
}

#[derive(Clone)]
struct DialogueTemplate {
    speaker: Speaker,
    name: String,
    voice_id: String,
}

impl ScriptParser {
    pub fn new(roster: &VoiceRoster) -> Result<Self> {
        let patterns = roster
            .hosts()
            .into_iter()
            .map(|(speaker, character)| {
                let pattern = format!(
                    r"^\*{{0,2}}{}\*{{0,2}}\s*[:：-]\*{{0,2}}\s*(.+)$",
                    regex::escape(&character.name)
                );
                let re = Regex::new(&pattern).map_err(anyhow::Error::from)?;
                Ok((
                    re,
                    DialogueTemplate {
                        speaker,
                        name: character.name.clone(),
                        voice_id: character.voice_id.clone(),
                    },
                ))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// Returns the recognized dialogue lines of `script` in order.
    ///
    /// An empty result is not an error here; see [`ScriptParser::parse_required`].
    pub fn parse(&self, script: &str) -> Vec<DialogueSegment> {
        let mut segments = Vec::new();
        for line in script.lines() {
            let line = line.trim();
            if is_noise(line) {
                continue;
            }
            for (re, template) in &self.patterns {
                let Some(caps) = re.captures(line) else {
                    continue;
                };
                let text = caps.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
                if text.chars().count() > MIN_TEXT_CHARS {
                    segments.push(DialogueSegment {
                        speaker: template.speaker,
                        name: template.name.clone(),
                        text: text.to_string(),
                        voice_id: template.voice_id.clone(),
                        emotion: DEFAULT_EMOTION.to_string(),
                    });
                }
                break;
            }
        }
        debug!(segments = segments.len(), "parsed dialogue");
        segments
    }

    /// Like [`ScriptParser::parse`], but fails with [`Error::NoDialogue`]
    /// when nothing was recognized.
    pub fn parse_required(&self, script: &str) -> Result<Vec<DialogueSegment>> {
        let segments = self.parse(script);
        if segments.is_empty() {
            return Err(Error::NoDialogue {
                script_len: script.chars().count(),
                preview: preview(script, PREVIEW_CHARS),
            });
        }
        Ok(segments)
    }
}

fn is_noise(line: &str) -> bool {
    line.is_empty()
        || line.starts_with('#')
        || line.starts_with("---")
        || line.starts_with("===")
        || line.chars().count() < MIN_LINE_CHARS
}

/// Returns the first `max` characters of `s`.
pub fn preview(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Estimates spoken seconds for `text`, rounding up.
pub fn estimate_seconds(text: &str) -> u64 {
    text.chars().count().div_ceil(CHARS_PER_SECOND) as u64
}
