//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::DomainError;
use session_store::SessionStoreError;
use thiserror::Error;

/// API-level error type that maps to HTTP responses.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Domain or session storage failure.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The page template failed to render.
    #[error("Template error: {0}")]
    Render(#[from] minijinja::Error),

    /// Internal server error.
    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Domain(DomainError::SessionStore(SessionStoreError::CapacityExceeded {
                ..
            })) => {
                tracing::warn!(error = %self, "session store is full");
                StatusCode::SERVICE_UNAVAILABLE
            }
            ApiError::Render(err) => {
                tracing::error!(error = %err, "page rendering failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
