use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::DocumentError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<DocumentError> for AppError {
    fn from(err: DocumentError) -> Self {
        match &err {
            DocumentError::UnsupportedFormat(ext) => AppError::Validation(format!(
                "Invalid file format. Only PDF and DOCX files are allowed. Got: {ext}"
            )),
            DocumentError::Extraction { .. } => {
                AppError::UnprocessableEntity(format!("Unable to extract text from file: {err}"))
            }
            DocumentError::UnreadableContent { chars } => {
                tracing::warn!("Rejected upload with {chars} readable characters");
                AppError::UnprocessableEntity(
                    "No readable text found in the file. Please ensure the file is not corrupted or password-protected."
                        .to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                msg.clone(),
            ),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::DocumentFormat;

    #[test]
    fn test_extraction_errors_are_client_errors() {
        let err: AppError = DocumentError::Extraction {
            format: DocumentFormat::Pdf,
            reason: "invalid xref".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::UnprocessableEntity(ref m) if m.contains("invalid xref")));
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_unreadable_content_is_distinct_from_extraction_failure() {
        let err: AppError = DocumentError::UnreadableContent { chars: 5 }.into();
        assert!(matches!(err, AppError::UnprocessableEntity(ref m) if m.starts_with("No readable text")));
    }

    #[test]
    fn test_unsupported_format_is_bad_request() {
        let err: AppError = DocumentError::UnsupportedFormat(".txt".to_string()).into();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_internal_error_hides_details() {
        let response = AppError::Internal(anyhow::anyhow!("worker panicked")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
