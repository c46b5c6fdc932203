use super::tts_repository::{split_into_batches_by, TtsRepository};
use crate::domain::tts::{LanguageCode, SpeakingRate, VoiceSettings};
use async_trait::async_trait;
use aws_sdk_polly::{
    types::{Engine, OutputFormat, TextType, VoiceId},
    Client as PollyClient,
};
use quick_xml::escape::escape;
use std::sync::Arc;

/// AWS Polly has a limit of 3000 billed characters per request.
/// Batches are measured after XML escaping, so the SSML request stays well
/// under the 6000 character input cap.
const MAX_BATCH_SIZE: usize = 3000;

/// AWS Polly implementation of TTS repository
pub struct PollyTtsRepository {
    polly_client: Arc<PollyClient>,
}

impl PollyTtsRepository {
    pub fn new(polly_client: Arc<PollyClient>) -> Self {
        Self { polly_client }
    }

    /// Select the appropriate Polly voice for a language
    fn get_voice_for_language(language: LanguageCode) -> &'static str {
        match language {
            LanguageCode::English => "Joanna",
        }
    }

    /// Wrap a batch in SSML so the speaking rate reaches Polly
    fn to_ssml(text: &str, rate: SpeakingRate) -> String {
        let rate = match rate {
            SpeakingRate::Slow => "slow",
        };
        format!(
            "<speak><prosody rate=\"{}\">{}</prosody></speak>",
            rate,
            escape(text)
        )
    }

    /// Call AWS Polly to synthesize a single text batch
    async fn call_polly(&self, text: &str, voice: VoiceSettings) -> Result<Vec<u8>, String> {
        let voice_name = Self::get_voice_for_language(voice.language);
        let voice_id = VoiceId::from(voice_name);
        let engine = Engine::Neural;

        let text_preview: String = text.chars().take(200).collect();
        tracing::info!(
            language = %voice.language,
            voice = voice_name,
            rate = ?voice.rate,
            engine = ?engine,
            output_format = "Mp3",
            text_length = text.len(),
            text_preview = %text_preview,
            "Calling AWS Polly synthesize_speech"
        );

        let result = self
            .polly_client
            .synthesize_speech()
            .text(Self::to_ssml(text, voice.rate))
            .text_type(TextType::Ssml)
            .voice_id(voice_id)
            .output_format(OutputFormat::Mp3)
            .engine(engine.clone())
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = ?e,
                    error_display = %e,
                    language = %voice.language,
                    voice = voice_name,
                    engine = ?engine,
                    text_length = text.len(),
                    "AWS Polly synthesize_speech failed"
                );
                format!("AWS Polly error: {}", e)
            })?;

        tracing::debug!("AWS Polly synthesize_speech successful, reading audio stream");

        let audio_stream = result.audio_stream.collect().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to collect audio stream from Polly response");
            format!("Failed to read audio stream: {}", e)
        })?;

        let audio_bytes = audio_stream.into_bytes().to_vec();
        tracing::debug!(
            audio_size = audio_bytes.len(),
            "Audio stream collected successfully"
        );

        Ok(audio_bytes)
    }

    /// Synthesize multiple text batches and merge the audio results in order
    async fn synthesize_batches(
        &self,
        batches: &[String],
        voice: VoiceSettings,
    ) -> Result<Vec<u8>, String> {
        let mut merged_audio = Vec::new();

        for (index, batch) in batches.iter().enumerate() {
            tracing::info!(
                batch_index = index,
                batch_size = batch.len(),
                "Synthesizing batch"
            );

            let audio_data = self.call_polly(batch, voice).await?;
            merged_audio.extend(audio_data);

            tracing::info!(
                batch_index = index,
                total_audio_size = merged_audio.len(),
                "Batch synthesized and merged"
            );
        }

        Ok(merged_audio)
    }
}

#[async_trait]
impl TtsRepository for PollyTtsRepository {
    async fn synthesize(&self, text: &str, voice: VoiceSettings) -> Result<Vec<u8>, String> {
        let start_time = std::time::Instant::now();

        let batches = split_into_batches_by(text, MAX_BATCH_SIZE, escaped_len);
        if batches.is_empty() {
            return Err("No text to speak".to_string());
        }
        tracing::info!(
            batch_count = batches.len(),
            text_length = text.len(),
            "Text split into batches"
        );

        let audio_data = self.synthesize_batches(&batches, voice).await?;

        let duration = start_time.elapsed();
        let characters_count = text.len();
        let throughput_chars_per_sec = if duration.as_secs_f64() > 0.0 {
            characters_count as f64 / duration.as_secs_f64()
        } else {
            0.0
        };

        tracing::info!(
            provider = "polly",
            latency_ms = duration.as_millis(),
            latency_secs = duration.as_secs_f64(),
            characters_count = characters_count,
            batch_count = batches.len(),
            audio_size_bytes = audio_data.len(),
            throughput_chars_per_sec = format!("{:.2}", throughput_chars_per_sec),
            "TTS synthesis completed"
        );

        Ok(audio_data)
    }
}

/// Length of a batch once escaped for SSML
fn escaped_len(text: &str) -> usize {
    escape(text).chars().count()
}
