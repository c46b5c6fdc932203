pub mod extraction;
pub mod health;
pub mod page;
pub mod tts;
