//! The inventory page: product list plus add-product form.

use std::sync::Arc;

use axum::Form;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use domain::{FormState, InventoryService, Outcome, RawProductForm, Session};
use metrics_exporter_prometheus::PrometheusHandle;
use session_store::SessionStore;

use crate::error::ApiError;
use crate::render::Renderer;
use crate::session::RequestSession;

/// Path the page is served from and the form posts to.
pub const PAGE_PATH: &str = "/";

/// Shared application state accessible from all handlers.
pub struct AppState<S: SessionStore<Session>> {
    pub inventory: InventoryService<S>,
    pub renderer: Renderer,
    pub metrics: PrometheusHandle,
}

/// GET / — product list with an empty form, consuming any pending flash.
#[tracing::instrument(skip(state, session), fields(session_id = %session.id))]
pub async fn show<S: SessionStore<Session> + 'static>(
    State(state): State<Arc<AppState<S>>>,
    session: RequestSession,
) -> Result<Response, ApiError> {
    let page = state.inventory.view(session.id).await?;
    let html = state.renderer.render_page(
        PAGE_PATH,
        &page.products,
        page.flash.as_deref(),
        &FormState::empty(),
    )?;
    session.finish(Html(html).into_response())
}

/// POST / — add a product.
///
/// Redirects back to the page on success so a refresh cannot resubmit;
/// otherwise renders the page again with the errors and the trimmed input.
#[tracing::instrument(skip(state, session, form), fields(session_id = %session.id))]
pub async fn submit<S: SessionStore<Session> + 'static>(
    State(state): State<Arc<AppState<S>>>,
    session: RequestSession,
    Form(form): Form<RawProductForm>,
) -> Result<Response, ApiError> {
    let response = match state.inventory.submit(session.id, form).await? {
        Outcome::Redirect { location, .. } => Redirect::to(&location).into_response(),
        Outcome::Render(form_state) => {
            let page = state.inventory.view(session.id).await?;
            let html = state.renderer.render_page(
                PAGE_PATH,
                &page.products,
                page.flash.as_deref(),
                &form_state,
            )?;
            Html(html).into_response()
        }
    };
    session.finish(response)
}
