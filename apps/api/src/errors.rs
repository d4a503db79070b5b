use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors raised by the extraction / matching core.
///
/// Every variant is recoverable. An empty job keyword set is not an error:
/// the comparator scores it as 0.0.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Document unreadable: {0}")]
    DocumentUnreadable(String),

    #[error("Missing input: {0}")]
    MissingInput(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing input: {0}")]
    MissingInput(&'static str),

    #[error("Document unreadable: {0}")]
    DocumentUnreadable(String),

    #[error("Multipart error: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::DocumentUnreadable(reason) => AppError::DocumentUnreadable(reason),
            AnalysisError::MissingInput(field) => AppError::MissingInput(field),
            AnalysisError::Io(e) => AppError::Internal(e.into()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::MissingInput(field) => (
                StatusCode::BAD_REQUEST,
                "MISSING_INPUT",
                format!(
                    "'{field}' is required. Please upload a resume and paste a job description before analyzing."
                ),
            ),
            AppError::DocumentUnreadable(reason) => {
                tracing::warn!("Rejected unreadable document: {reason}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "DOCUMENT_UNREADABLE",
                    "The uploaded file could not be read as a PDF document".to_string(),
                )
            }
            AppError::Multipart(e) => {
                let status = e.status();
                let code = if status == StatusCode::PAYLOAD_TOO_LARGE {
                    "PAYLOAD_TOO_LARGE"
                } else {
                    "INVALID_MULTIPART"
                };
                (status, code, e.body_text())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
