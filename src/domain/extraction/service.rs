use super::error::ExtractionError;
use super::model::{ExtractedText, UploadedDocument};
use crate::infrastructure::repositories::{DocumentRepository, PageTexts};
use async_trait::async_trait;
use std::sync::Arc;

pub struct ExtractionService {
    document_repo: Arc<dyn DocumentRepository>,
}

impl ExtractionService {
    pub fn new(document_repo: Arc<dyn DocumentRepository>) -> Self {
        Self { document_repo }
    }
}

#[async_trait]
pub trait ExtractionServiceApi: Send + Sync {
    /// Extract the text of an uploaded document
    ///
    /// Checks, in order: a file part was sent, its filename is not empty,
    /// the document opens, and the concatenated page text is not blank.
    /// Pages are joined without a separator.
    async fn extract(
        &self,
        upload: Option<UploadedDocument>,
    ) -> Result<ExtractedText, ExtractionError>;
}

#[async_trait]
impl ExtractionServiceApi for ExtractionService {
    async fn extract(
        &self,
        upload: Option<UploadedDocument>,
    ) -> Result<ExtractedText, ExtractionError> {
        let UploadedDocument { filename, bytes } =
            upload.ok_or(ExtractionError::MissingFilePart)?;

        if filename.is_empty() {
            return Err(ExtractionError::NoFileSelected);
        }

        tracing::info!(
            filename = %filename,
            size_bytes = bytes.len(),
            "Text extraction request"
        );

        let start_time = std::time::Instant::now();

        // Parsing is CPU bound, keep it off the async workers
        let document_repo = self.document_repo.clone();
        let extracted = tokio::task::spawn_blocking(move || {
            let pages = document_repo
                .pages(&bytes)
                .map_err(ExtractionError::Unreadable)?;
            Ok::<_, ExtractionError>(concatenate_pages(pages))
        })
        .await
        .map_err(|e| anyhow::anyhow!("extraction task failed: {}", e))??;

        if extracted.text.trim().is_empty() {
            tracing::warn!(
                filename = %filename,
                page_count = extracted.page_count,
                "Document contains no extractable text"
            );
            return Err(ExtractionError::NoTextFound);
        }

        tracing::info!(
            filename = %filename,
            page_count = extracted.page_count,
            text_length = extracted.text.len(),
            latency_ms = start_time.elapsed().as_millis(),
            "Text extraction completed"
        );

        Ok(extracted)
    }
}

/// Fold page texts left to right into one string.
///
/// A page whose extraction fails contributes nothing, like an image-only page.
fn concatenate_pages(pages: PageTexts) -> ExtractedText {
    let initial = ExtractedText {
        text: String::new(),
        page_count: 0,
    };

    pages.fold(initial, |mut acc, page| {
        acc.page_count += 1;
        match page {
            Ok(text) => acc.text.push_str(&text),
            Err(e) => tracing::warn!(
                page = acc.page_count,
                error = %e,
                "Page text extraction failed, skipping page"
            ),
        }
        acc
    })
}
