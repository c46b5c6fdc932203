use super::tts_repository::{split_into_batches, TtsRepository};
use crate::domain::tts::{SpeakingRate, VoiceSettings};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::header::{REFERER, USER_AGENT};
use serde_json::{json, Value};

/// The Google Translate speech endpoint only accepts short inputs
const MAX_BATCH_SIZE: usize = 100;

/// RPC id of the speech call on the batchexecute endpoint
const RPC_ID: &str = "jQ1olc";

const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Google Translate implementation of TTS repository
pub struct GoogleTtsRepository {
    client: reqwest::Client,
    endpoint: String,
}

impl GoogleTtsRepository {
    pub fn new(client: reqwest::Client, tld: &str) -> Self {
        Self::with_endpoint(
            client,
            format!(
                "https://translate.google.{}/_/TranslateWebserverUi/data/batchexecute",
                tld
            ),
        )
    }

    pub fn with_endpoint(client: reqwest::Client, endpoint: String) -> Self {
        Self { client, endpoint }
    }

    /// Build the `f.req` form value for one batch
    fn package_rpc(text: &str, voice: VoiceSettings) -> String {
        let slow = match voice.rate {
            SpeakingRate::Slow => true,
        };
        let parameter = json!([text, voice.language.as_str(), slow, "null"]).to_string();
        json!([[[RPC_ID, parameter, null, "generic"]]]).to_string()
    }

    /// Call the speech endpoint for a single text batch
    async fn call_google(&self, text: &str, voice: VoiceSettings) -> Result<Vec<u8>, String> {
        let text_preview: String = text.chars().take(200).collect();
        tracing::info!(
            language = %voice.language,
            rate = ?voice.rate,
            text_length = text.len(),
            text_preview = %text_preview,
            "Calling Google TTS batchexecute"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header(REFERER, "http://translate.google.com/")
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .form(&[("f.req", Self::package_rpc(text, voice))])
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    endpoint = %self.endpoint,
                    text_length = text.len(),
                    "Google TTS request failed"
                );
                format!("Google TTS error: {}", e)
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(status = %status, "Google TTS returned an error status");
            return Err(format!("Google TTS returned HTTP {}", status));
        }

        let body = response
            .text()
            .await
            .map_err(|e| format!("Failed to read Google TTS response: {}", e))?;

        let audio_bytes = parse_audio(&body)?;
        tracing::debug!(
            audio_size = audio_bytes.len(),
            "Google TTS audio decoded successfully"
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
            tracing::debug!(
                batch_index = index,
                batch_size = batch.len(),
                "Synthesizing batch"
            );

            let audio_data = self.call_google(batch, voice).await?;
            merged_audio.extend(audio_data);
        }

        Ok(merged_audio)
    }
}

#[async_trait]
impl TtsRepository for GoogleTtsRepository {
    async fn synthesize(&self, text: &str, voice: VoiceSettings) -> Result<Vec<u8>, String> {
        let start_time = std::time::Instant::now();

        let batches = split_into_batches(text, MAX_BATCH_SIZE);
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
        tracing::info!(
            provider = "google",
            latency_ms = duration.as_millis(),
            characters_count = text.len(),
            batch_count = batches.len(),
            audio_size_bytes = audio_data.len(),
            "TTS synthesis completed"
        );

        Ok(audio_data)
    }
}

/// Pull the base64 MP3 segment out of a batchexecute response.
///
/// The body is a sequence of length-prefixed JSON lines; the line holding
/// the speech result contains an entry `["wrb.fr", "jQ1olc", "[\"<base64>\"]", ...]`.
fn parse_audio(body: &str) -> Result<Vec<u8>, String> {
    for line in body.lines().filter(|line| line.contains(RPC_ID)) {
        let Ok(envelope) = serde_json::from_str::<Value>(line) else {
            continue;
        };
        let Some(entries) = envelope.as_array() else {
            continue;
        };

        for entry in entries {
            if entry.get(1).and_then(Value::as_str) != Some(RPC_ID) {
                continue;
            }

            let payload = entry
                .get(2)
                .and_then(Value::as_str)
                .ok_or_else(|| "Google TTS response carried no audio".to_string())?;
            let inner: Value = serde_json::from_str(payload)
                .map_err(|e| format!("Malformed Google TTS payload: {}", e))?;
            let encoded = inner
                .get(0)
                .and_then(Value::as_str)
                .ok_or_else(|| "Google TTS response carried no audio".to_string())?;

            return STANDARD
                .decode(encoded)
                .map_err(|e| format!("Invalid base64 audio from Google TTS: {}", e));
        }
    }

    Err("Google TTS response carried no audio".to_string())
}
