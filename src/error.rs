use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

/// Recoverable failures of studio operations. State is left unchanged
/// whenever one of these is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StudioError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid state: {0}")]
    InvalidState(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("No attendees to export for class {0}")]
    EmptyRoster(String),
    #[error("Invalid seed data: {0}")]
    InvalidSeed(String),
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg).into_response(),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg).into_response(),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg).into_response(),
        }
    }
}

impl From<StudioError> for ApiError {
    fn from(value: StudioError) -> Self {
        match value {
            StudioError::InvalidInput(_) => ApiError::BadRequest(value.to_string()),
            StudioError::InvalidState(_) => ApiError::Conflict(value.to_string()),
            StudioError::NotFound(_) | StudioError::EmptyRoster(_) => {
                ApiError::NotFound(value.to_string())
            }
            StudioError::InvalidSeed(msg) => {
                error!("Seed error: {msg}");
                ApiError::Internal("Studio data is inconsistent".into())
            }
        }
    }
}
