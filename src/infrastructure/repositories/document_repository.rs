/// Text of each page, yielded lazily in document order.
/// An `Err` item is a page whose text could not be extracted.
pub type PageTexts = Box<dyn Iterator<Item = Result<String, String>> + Send>;

/// Repository for document text extraction.
/// Abstracts the underlying document parser.
///
/// Calls are blocking; run them on a blocking thread.
pub trait DocumentRepository: Send + Sync {
    /// Open a document and return its pages.
    ///
    /// # Errors
    /// Returns error if the bytes cannot be opened as a paged document
    fn pages(&self, document: &[u8]) -> Result<PageTexts, String>;
}
