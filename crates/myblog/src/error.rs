//! Error types for the content collections

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Result type alias for content operations
pub type ContentResult<T> = Result<T, ContentError>;

/// Content error types
#[derive(Debug, Error)]
pub enum ContentError {
    /// A required field is missing/empty or a value failed its cast
    #[error("{0}")]
    Validation(String),

    /// An update value failed its cast; reported like a missing target
    #[error("{0}")]
    UpdateRejected(String),

    /// The request body is not a JSON object
    #[error("{0}")]
    InvalidBody(String),

    #[error("Not found")]
    NotFound,

    #[error("Endpoint not found")]
    EndpointNotFound,

    /// The store is unreachable or rejected the operation
    #[error("{0}")]
    Store(String),

    #[error("{0}")]
    Internal(String),
}

impl From<mongodb::error::Error> for ContentError {
    fn from(err: mongodb::error::Error) -> Self {
        ContentError::Store(err.to_string())
    }
}

impl From<bson::ser::Error> for ContentError {
    fn from(err: bson::ser::Error) -> Self {
        ContentError::Internal(err.to_string())
    }
}

/// Error envelope returned by every failing endpoint
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub success: bool,
    pub error: String,
}

impl ContentError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ContentError::Validation(_) | ContentError::InvalidBody(_) => StatusCode::BAD_REQUEST,

            ContentError::NotFound
            | ContentError::UpdateRejected(_)
            | ContentError::EndpointNotFound => StatusCode::NOT_FOUND,

            ContentError::Store(_) | ContentError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ContentError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        let body = ApiError {
            success: false,
            error: self.to_string(),
        };

        (status, axum::Json(body)).into_response()
    }
}
