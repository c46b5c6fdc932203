use serde::{Deserialize, Serialize};

/// ISO 639-1 language codes the narrator speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LanguageCode {
    #[serde(rename = "en")]
    English,
}

impl LanguageCode {
    /// Get the ISO 639-1 code as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageCode::English => "en",
        }
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Speaking rates the narrator uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeakingRate {
    Slow,
}

/// Voice profile handed to a TTS repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceSettings {
    pub language: LanguageCode,
    pub rate: SpeakingRate,
}

impl VoiceSettings {
    /// English at a slowed rate. Narration always uses this profile: clearer
    /// speech in exchange for longer audio and longer synthesis.
    pub const NARRATION: VoiceSettings = VoiceSettings {
        language: LanguageCode::English,
        rate: SpeakingRate::Slow,
    };
}
