pub mod extraction;
pub mod tts;
