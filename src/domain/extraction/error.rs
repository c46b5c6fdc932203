use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("No file part")]
    MissingFilePart,
    #[error("No selected file")]
    NoFileSelected,
    #[error("No text found in PDF")]
    NoTextFound,
    #[error("unreadable document: {0}")]
    Unreadable(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<ExtractionError> for AppError {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::MissingFilePart
            | ExtractionError::NoFileSelected
            | ExtractionError::NoTextFound => AppError::BadRequest(err.to_string()),
            ExtractionError::Unreadable(msg) => {
                tracing::warn!(error = %msg, "Document could not be parsed");
                AppError::UnprocessableEntity("Could not read PDF".to_string())
            }
            ExtractionError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
