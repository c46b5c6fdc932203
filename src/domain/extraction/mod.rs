pub mod error;
pub mod model;
pub mod service;

pub use error::ExtractionError;
pub use model::{ExtractedText, UploadedDocument};
pub use service::{ExtractionService, ExtractionServiceApi};
