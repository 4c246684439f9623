//! Voice characters and voice id selection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Voice used when a character's own voice keeps failing.
pub const FALLBACK_VOICE_ID: &str = "male-qn-qingse";

/// Female Japanese voice.
pub const VOICE_JA_FEMALE: &str = "moss_audio_d3f65edb-4c57-11f0-acba-96daea575b6a";

/// Male Japanese voice used for single-host narration.
pub const VOICE_JA_MALE_NARRATOR: &str = "moss_audio_eabf88cc-4c59-11f0-b862-46ba4da2d9df";

/// Male Japanese voice used for the second podcast host.
pub const VOICE_JA_MALE_HOST: &str = "moss_audio_3b2bc732-4cc1-11f0-a6ae-72d5dcf0f535";

/// Narration styles with an explicit voice mapping.
pub const NARRATION_STYLES: [&str; 4] = ["educational", "conversational", "narrative", "interview"];

/// Podcast host identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Akira,
    Yuuki,
}

impl Speaker {
    pub fn as_str(&self) -> &'static str {
        match self {
            Speaker::Akira => "akira",
            Speaker::Yuuki => "yuuki",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
}

/// Static description of one podcast host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceCharacter {
    pub name: String,
    pub gender: Gender,
    pub voice_id: String,
    pub personality: String,
}

/// The two hosts of a podcast episode.
///
/// Serializes as `{"akira": {...}, "yuuki": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceRoster {
    pub akira: VoiceCharacter,
    pub yuuki: VoiceCharacter,
}

impl Default for VoiceRoster {
    fn default() -> Self {
        Self {
            akira: VoiceCharacter {
                name: "アキラ".to_string(),
                gender: Gender::Female,
                voice_id: VOICE_JA_FEMALE.to_string(),
                personality: "かわいくて天真爛漫で、知識はまだ浅い。分からないことがあれば素直に質問し、会話を明るくする".to_string(),
            },
            yuuki: VoiceCharacter {
                name: "ユウキ".to_string(),
                gender: Gender::Male,
                voice_id: VOICE_JA_MALE_HOST.to_string(),
                personality: "落ち着いた語り口の頼れる兄貴分。実体験や独自の視点を交え、深い洞察を述べる".to_string(),
            },
        }
    }
}

impl VoiceRoster {
    /// Returns hosts in a fixed order together with their ids.
    pub fn hosts(&self) -> [(Speaker, &VoiceCharacter); 2] {
        [(Speaker::Akira, &self.akira), (Speaker::Yuuki, &self.yuuki)]
    }
}

/// Outcome of picking a narrator voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoiceResolution {
    pub voice_id: &'static str,
    /// False when the `(voice, style)` pair was unknown and the gender
    /// default was used.
    pub from_mapping: bool,
}

/// Picks the narrator voice for a `(voice, style)` pair.
///
/// Unknown pairs fall back by gender: `female` gets the female voice,
/// anything else the male one.
pub fn resolve_narrator_voice(voice: &str, style: &str) -> VoiceResolution {
    let mapped = match voice {
        "female" | "male" if NARRATION_STYLES.contains(&style) => Some(gender_default(voice)),
        _ => None,
    };
    match mapped {
        Some(voice_id) => VoiceResolution {
            voice_id,
            from_mapping: true,
        },
        None => VoiceResolution {
            voice_id: gender_default(voice),
            from_mapping: false,
        },
    }
}

fn gender_default(voice: &str) -> &'static str {
    if voice == "female" {
        VOICE_JA_FEMALE
    } else {
        VOICE_JA_MALE_NARRATOR
    }
}

/// The full `voice -> style -> voice id` table.
pub fn narrator_voice_mapping() -> BTreeMap<&'static str, BTreeMap<&'static str, &'static str>> {
    ["female", "male"]
        .into_iter()
        .map(|voice| {
            let styles = NARRATION_STYLES
                .iter()
                .map(|style| (*style, gender_default(voice)))
                .collect();
            (voice, styles)
        })
        .collect()
}

/// A voice offered when the upstream listing is unavailable.
#[derive(Debug, Clone, Serialize)]
pub struct PresetVoice {
    pub voice_id: &'static str,
    pub name: &'static str,
    pub gender: Gender,
    pub language: &'static str,
    pub description: &'static str,
}

pub const PRESET_VOICES: [PresetVoice; 4] = [
    PresetVoice {
        voice_id: "female-japanese-warm",
        name: "温柔日语女声",
        gender: Gender::Female,
        language: "ja",
        description: "适合对话式和叙述式播客",
    },
    PresetVoice {
        voice_id: "female-japanese-professional",
        name: "专业日语女声",
        gender: Gender::Female,
        language: "ja",
        description: "适合教育性播客",
    },
    PresetVoice {
        voice_id: "male-japanese-warm",
        name: "温和日语男声",
        gender: Gender::Male,
        language: "ja",
        description: "适合对话式和叙述式播客",
    },
    PresetVoice {
        voice_id: "male-japanese-professional",
        name: "专业日语男声",
        gender: Gender::Male,
        language: "ja",
        description: "适合教育性和访谈式播客",
    },
];
