//! Error types for wcdb-api
//!
//! Every failure reaching a handler is mapped to a status code and a
//! `{"error": "<message>"}` body exactly once, here.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::SimulationError;
use crate::validators::ValidationError;

/// Message returned for every storage failure; details stay in the logs
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed input or broken business rule (400)
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Well-formed key with no record (404)
    #[error("{0}")]
    NotFound(String),

    /// Request is valid but cannot be served in the current state (400)
    #[error("{0}")]
    Precondition(String),

    /// Storage or other unexpected failure (500)
    #[error("Storage error: {0}")]
    Storage(#[from] wcdb_common::Error),
}

impl From<SimulationError> for ApiError {
    fn from(err: SimulationError) -> Self {
        match err {
            SimulationError::NoHistoricalData => {
                ApiError::Precondition(SimulationError::NoHistoricalData.to_string())
            }
            SimulationError::Storage(e) => ApiError::Storage(e),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Precondition(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Storage(err) => {
                // The request span from `build_router` supplies method and URI
                tracing::error!(error = %err, details = ?err, "Request failed");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_message_is_verbatim() {
        let (status, body) = body_of(ValidationError::new("Year is required").into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Year is required"}));
    }

    #[tokio::test]
    async fn test_storage_details_not_leaked() {
        let err = wcdb_common::Error::Internal("disk on fire at /var/lib/wcdb".to_string());
        let (status, body) = body_of(err.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": INTERNAL_ERROR_MESSAGE}));
    }

    #[tokio::test]
    async fn test_no_history_is_precondition() {
        let (status, body) = body_of(SimulationError::NoHistoricalData.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No historical winners found to simulate from");
    }

    #[tokio::test]
    async fn test_not_found_status() {
        let (status, _) = body_of(ApiError::NotFound("missing".to_string())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
