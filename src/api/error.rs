/// HTTP error mapping
///
/// Wraps the store taxonomy and renders each class as its own status
/// code with a `{"error": "..."}` JSON body, instead of collapsing
/// everything into a generic 500.

use crate::error::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// API-facing error, convertible from any store failure
#[derive(Debug)]
pub struct ApiError(StoreError);

impl ApiError {
    /// Reject a malformed payload before it reaches the store layer
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError(StoreError::Validation(message.into()))
    }

    /// Status code for the wrapped failure class
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
            StoreError::Conflict(_) => StatusCode::CONFLICT,
            StoreError::Validation(_) => StatusCode::BAD_REQUEST,
            StoreError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Storage failures are logged server-side and kept opaque to the
        // caller; the other classes carry their message through.
        let message = match &self.0 {
            StoreError::Internal(err) => {
                tracing::error!("Storage failure: {}", err);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
