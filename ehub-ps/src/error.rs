//! Error types for ehub-ps
//!
//! Every error body has the shape `{"detail": "<message>"}`.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ehub_common::scoring::ScoreError;
use serde_json::json;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body missing, malformed or of the wrong shape
    #[error("{0}")]
    InvalidBody(#[from] JsonRejection),

    /// Scoring failed for an otherwise valid request (500)
    #[error("{0}")]
    Scoring(#[from] ScoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidBody(rejection) => rejection.status(),
            ApiError::Scoring(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "detail": self.to_string() }));
        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
