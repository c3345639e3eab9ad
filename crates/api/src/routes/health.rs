//! Health check endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use domain::Session;
use serde::Serialize;
use session_store::SessionStore;

use crate::error::ApiError;
use crate::routes::inventory::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub sessions: usize,
}

/// GET /health — liveness plus the number of sessions held in memory.
pub async fn check<S: SessionStore<Session> + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<HealthResponse>, ApiError> {
    let sessions = state
        .inventory
        .store()
        .session_count()
        .await
        .map_err(domain::DomainError::from)?;
    Ok(Json(HealthResponse {
        status: "ok",
        sessions,
    }))
}
