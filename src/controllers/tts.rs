use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
};
use std::sync::Arc;

use crate::{
    domain::tts::{TtsService, TtsServiceApi},
    error::AppResult,
    infrastructure::http::FormFields,
};

/// Serve audio as a download named `speech.mp3`
const AUDIO_DISPOSITION: &str = "attachment; filename=\"speech.mp3\"";

pub struct TtsController {
    tts_service: Arc<TtsService>,
}

impl TtsController {
    pub fn new(tts_service: Arc<TtsService>) -> Self {
        Self { tts_service }
    }

    /// POST /synthesize - Convert the `text` form field to speech
    pub async fn synthesize(
        State(controller): State<Arc<TtsController>>,
        mut form: FormFields,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let result = controller.tts_service.synthesize(form.take("text")).await?;

        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("audio/mp3"));
        headers.insert(
            header::CONTENT_DISPOSITION,
            HeaderValue::from_static(AUDIO_DISPOSITION),
        );
        headers.insert("x-character-count", HeaderValue::from(result.char_count));

        Ok((StatusCode::OK, headers, Body::from(result.audio_data)))
    }
}
