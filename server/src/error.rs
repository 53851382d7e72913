//! HTTP error mapping.
//!
//! Every failure leaves the service as a JSON body of the form
//! `{"error": "<message>"}` with the status picked below.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use todo_core::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// A required field is missing or has the wrong JSON type, or the body
    /// is not JSON at all.
    #[error("{0}")]
    Validation(String),

    #[error("Not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Store(StoreError::EmptyPatch) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Store(StoreError::Database(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, %status, "request rejected");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
