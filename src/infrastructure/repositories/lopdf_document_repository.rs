use super::document_repository::{DocumentRepository, PageTexts};
use lopdf::Document;

/// PDF implementation of document repository backed by lopdf
#[derive(Debug, Default)]
pub struct LopdfDocumentRepository;

impl LopdfDocumentRepository {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentRepository for LopdfDocumentRepository {
    fn pages(&self, document: &[u8]) -> Result<PageTexts, String> {
        let doc = Document::load_mem(document).map_err(|e| {
            tracing::debug!(error = %e, size_bytes = document.len(), "lopdf failed to load document");
            e.to_string()
        })?;

        let page_numbers: Vec<u32> = doc.get_pages().into_keys().collect();
        tracing::debug!(page_count = page_numbers.len(), "PDF loaded");

        Ok(Box::new(page_numbers.into_iter().map(move |page_number| {
            doc.extract_text(&[page_number])
                .map(strip_page_break)
                .map_err(|e| format!("page {}: {}", page_number, e))
        })))
    }
}

/// lopdf ends every text object with a line break, so a page's text always
/// closes with one. That break is not part of the page content.
fn strip_page_break(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
    }
    text
}
