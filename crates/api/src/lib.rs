//! HTTP server for the product inventory page.
//!
//! Serves a server-rendered product list with an add-product form,
//! following post/redirect/get: a successful submission redirects back
//! to the page, which then shows a one-time flash message. Sessions are
//! tracked with a cookie and held in memory.

pub mod config;
pub mod error;
pub mod render;
pub mod routes;
pub mod session;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use domain::{InventoryService, Session, SubmissionHandler, Validator};
use metrics_exporter_prometheus::PrometheusHandle;
use session_store::{InMemorySessionStore, SessionStore};
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;

use config::Config;
use render::Renderer;
use routes::inventory::{AppState, PAGE_PATH};

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: SessionStore<Session> + 'static>(state: Arc<AppState<S>>) -> Router {
    Router::new()
        .route(
            PAGE_PATH,
            get(routes::inventory::show::<S>).post(routes::inventory::submit::<S>),
        )
        .route("/health", get(routes::health::check::<S>))
        .route("/metrics", get(routes::metrics::get::<S>))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Creates the default application state backed by an in-memory session store.
pub fn create_default_state(
    config: &Config,
    metrics: PrometheusHandle,
) -> Result<Arc<AppState<InMemorySessionStore<Session>>>, minijinja::Error> {
    let store = InMemorySessionStore::with_options(config.store_options());
    let handler = SubmissionHandler::new(Validator::new(config.category_policy()), PAGE_PATH);

    Ok(Arc::new(AppState {
        inventory: InventoryService::new(store, handler),
        renderer: Renderer::new()?,
        metrics,
    }))
}

/// Periodically drops expired sessions until the task is aborted.
pub fn spawn_session_reaper<S>(store: S, every: Duration) -> JoinHandle<()>
where
    S: SessionStore<Session> + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every.max(Duration::from_secs(1)));
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            match store.purge_expired().await {
                Ok(0) => {}
                Ok(purged) => tracing::info!(purged, "expired sessions removed"),
                Err(e) => tracing::error!(error = %e, "session purge failed"),
            }
        }
    })
}
