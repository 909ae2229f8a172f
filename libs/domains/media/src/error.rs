use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("Unsupported image payload: {0}")]
    InvalidPayload(String),

    #[error("Failed to decode image payload: {0}")]
    Decode(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type IntakeResult<T> = Result<T, IntakeError>;

/// Convert IntakeError to AppError for standardized error responses
impl From<IntakeError> for AppError {
    fn from(err: IntakeError) -> Self {
        match err {
            IntakeError::InvalidPayload(msg) => AppError::BadRequest(msg),
            IntakeError::Decode(msg) => AppError::BadRequest(msg),
            IntakeError::Storage(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for IntakeError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<std::io::Error> for IntakeError {
    fn from(err: std::io::Error) -> Self {
        IntakeError::Storage(err.to_string())
    }
}
