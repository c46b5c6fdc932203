pub mod error;
pub mod service;
pub mod voice;

pub use error::TtsServiceError;
pub use service::{SynthesizedAudio, TtsService, TtsServiceApi};
pub use voice::{LanguageCode, SpeakingRate, VoiceSettings};
