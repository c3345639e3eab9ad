//! Prometheus metrics endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use domain::Session;
use session_store::SessionStore;

use crate::error::ApiError;
use crate::routes::inventory::AppState;

const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// GET /metrics — returns Prometheus-formatted metrics.
///
/// The live session gauge is sampled at scrape time.
pub async fn get<S: SessionStore<Session> + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<impl IntoResponse, ApiError> {
    let sessions = state
        .inventory
        .store()
        .session_count()
        .await
        .map_err(domain::DomainError::from)?;
    metrics::gauge!("sessions_live").set(sessions as f64);

    Ok((
        StatusCode::OK,
        [(CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)],
        state.metrics.render(),
    ))
}
