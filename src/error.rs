//! Error types for the Lectura server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::annotations::AnnotationError;
use crate::dictionary::DictionaryError;
use crate::extract::ExtractError;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Annotation error: {0}")]
    Validation(#[from] AnnotationError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Dictionary error: {0}")]
    Dictionary(#[from] DictionaryError),

    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            AppError::Validation(e) => match e {
                // A range collision is a conflict with existing state,
                // not a malformed request.
                AnnotationError::Overlap { .. } => {
                    (StatusCode::CONFLICT, "conflict", e.to_string())
                }
                _ => (StatusCode::BAD_REQUEST, "validation_error", e.to_string()),
            },
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "Database error".to_string(),
                )
            }
            AppError::Dictionary(e) => {
                tracing::error!("Dictionary error: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "dictionary_error",
                    "Dictionary provider error".to_string(),
                )
            }
            AppError::Extract(e) => match e {
                ExtractError::InvalidUrl(_) => {
                    (StatusCode::BAD_REQUEST, "invalid_url", e.to_string())
                }
                ExtractError::Timeout(_) => {
                    (StatusCode::REQUEST_TIMEOUT, "timeout", e.to_string())
                }
                ExtractError::FetchFailed(_) => {
                    (StatusCode::BAD_REQUEST, "fetch_failed", e.to_string())
                }
                ExtractError::NoContent(_) => {
                    (StatusCode::BAD_REQUEST, "no_content", e.to_string())
                }
            },
            AppError::Storage(msg) => {
                tracing::error!("Storage error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "storage_error",
                    "Storage error".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
            details: if cfg!(debug_assertions) {
                Some(self.to_string())
            } else {
                None
            },
        });

        (status, body).into_response()
    }
}
