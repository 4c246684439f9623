//! Model constants and predefined values for MiniMax API.

// ==================== Speech Models ====================

/// speech-2.6-hd, latest HD model with outstanding prosody.
pub const MODEL_SPEECH_26_HD: &str = "speech-2.6-hd";

/// speech-2.6-turbo, latest Turbo model with ultra-low latency.
pub const MODEL_SPEECH_26_TURBO: &str = "speech-2.6-turbo";

/// speech-02-hd, excellent rhythm, stability and cloning similarity.
pub const MODEL_SPEECH_02_HD: &str = "speech-02-hd";

/// speech-02-turbo, enhanced multilingual capabilities.
pub const MODEL_SPEECH_02_TURBO: &str = "speech-02-turbo";

// ==================== Voice IDs ====================

/// A young male voice (Chinese). Stable enough to serve as a fallback.
pub const VOICE_MALE_QINGSE: &str = "male-qn-qingse";

/// A young girl voice (Chinese).
pub const VOICE_FEMALE_SHAONV: &str = "female-shaonv";

// ==================== Language Boost Options ====================

pub const LANGUAGE_JAPANESE: &str = "Japanese";
pub const LANGUAGE_AUTO: &str = "auto";

// ==================== Emotion Options ====================

pub const EMOTION_HAPPY: &str = "happy";
pub const EMOTION_SAD: &str = "sad";
pub const EMOTION_NEUTRAL: &str = "neutral";
