use super::error::TtsServiceError;
use super::voice::VoiceSettings;
use crate::infrastructure::repositories::TtsRepository;
use async_trait::async_trait;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct SynthesizedAudio {
    pub audio_data: Vec<u8>,
    pub char_count: usize,
}

pub struct TtsService {
    tts_repo: Arc<dyn TtsRepository>,
}

impl TtsService {
    pub fn new(tts_repo: Arc<dyn TtsRepository>) -> Self {
        Self { tts_repo }
    }
}

#[async_trait]
pub trait TtsServiceApi: Send + Sync {
    /// Narrate text as MP3 audio
    ///
    /// This operation:
    /// - Rejects a missing or empty text field
    /// - Calls the configured TTS repository with the narration voice (English, slow)
    ///
    /// Text length is not capped here; repositories batch long input themselves.
    async fn synthesize(&self, text: Option<String>) -> Result<SynthesizedAudio, TtsServiceError>;
}

#[async_trait]
impl TtsServiceApi for TtsService {
    async fn synthesize(&self, text: Option<String>) -> Result<SynthesizedAudio, TtsServiceError> {
        let text = text
            .filter(|t| !t.is_empty())
            .ok_or(TtsServiceError::NoTextProvided)?;
        let char_count = text.chars().count();

        tracing::info!(
            text_length = char_count,
            voice = ?VoiceSettings::NARRATION,
            "TTS synthesis request"
        );

        let audio_data = self
            .tts_repo
            .synthesize(&text, VoiceSettings::NARRATION)
            .await
            .map_err(TtsServiceError::Dependency)?;

        if audio_data.is_empty() {
            return Err(TtsServiceError::Dependency(
                "TTS provider returned no audio".to_string(),
            ));
        }

        Ok(SynthesizedAudio {
            audio_data,
            char_count,
        })
    }
}
