//! HTTP error mapping
//!
//! Every error body is `{"error": "..."}`. Validation failures map to
//! 400 with a caller-facing message, missing entities to 404, and
//! everything else to an opaque 500 with the cause logged server-side.

use app_core::ServiceError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Error returned by route handlers
#[derive(Debug)]
pub enum ApiError {
    /// A mutating call arrived without a user identifier
    MissingUserId,
    /// A request failed validation, with a caller-facing message
    Validation(String),
    /// The design system does not exist or is not visible to the caller
    NotFound,
    /// A delegated call failed; details are logged, not exposed
    Internal(ServiceError),
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound => Self::NotFound,
            ServiceError::InvalidRating => Self::Validation(err.to_string()),
            other => Self::Internal(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::MissingUserId => {
                (StatusCode::BAD_REQUEST, "User ID is required".to_string())
            }
            Self::Validation(message) => (StatusCode::BAD_REQUEST, message),
            Self::NotFound => {
                (StatusCode::NOT_FOUND, "Design system not found".to_string())
            }
            Self::Internal(err) => {
                tracing::error!(error = %err, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Result type for route handlers
pub type ApiResult<T> = std::result::Result<T, ApiError>;
