pub mod document_repository;
pub mod google_tts_repository;
pub mod lopdf_document_repository;
pub mod polly_tts_repository;
pub mod tts_repository;

pub use document_repository::{DocumentRepository, PageTexts};
pub use google_tts_repository::GoogleTtsRepository;
pub use lopdf_document_repository::LopdfDocumentRepository;
pub use polly_tts_repository::PollyTtsRepository;
pub use tts_repository::{split_into_batches, TtsRepository};
