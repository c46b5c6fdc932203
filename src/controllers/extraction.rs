use axum::extract::State;
use std::sync::Arc;

use crate::{
    domain::extraction::{ExtractionService, ExtractionServiceApi},
    error::AppResult,
    infrastructure::http::UploadForm,
};

pub struct ExtractionController {
    extraction_service: Arc<ExtractionService>,
}

impl ExtractionController {
    pub fn new(extraction_service: Arc<ExtractionService>) -> Self {
        Self { extraction_service }
    }

    /// POST /upload - Extract the text of an uploaded PDF
    ///
    /// Responds with the raw extracted text as `text/plain`.
    pub async fn upload(
        State(controller): State<Arc<ExtractionController>>,
        UploadForm(upload): UploadForm,
    ) -> AppResult<String> {
        let extracted = controller.extraction_service.extract(upload).await?;
        Ok(extracted.text)
    }
}
