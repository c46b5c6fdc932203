use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum TtsServiceError {
    #[error("No text provided")]
    NoTextProvided,
    #[error("dependency error: {0}")]
    Dependency(String),
}

impl From<TtsServiceError> for AppError {
    fn from(err: TtsServiceError) -> Self {
        match err {
            TtsServiceError::NoTextProvided => AppError::BadRequest(err.to_string()),
            TtsServiceError::Dependency(msg) => AppError::ExternalService(msg),
        }
    }
}
