//! Inventory service tying the submission flow to session storage.

use common::SessionId;
use session_store::SessionStore;

use crate::error::DomainError;
use crate::session::{PageSnapshot, Session};
use crate::submission::{Outcome, SubmissionHandler};
use crate::validation::RawProductForm;

/// Service for the product inventory page.
///
/// Each operation runs as a single update on the caller's session, so a
/// submission's append and flash, or a page view's flash consumption,
/// cannot interleave with another request on the same session.
pub struct InventoryService<S: SessionStore<Session>> {
    store: S,
    handler: SubmissionHandler,
}

impl<S: SessionStore<Session>> InventoryService<S> {
    /// Creates a service over `store` using `handler` for submissions.
    pub fn new(store: S, handler: SubmissionHandler) -> Self {
        Self { store, handler }
    }

    /// Returns a reference to the underlying session store.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn handler(&self) -> &SubmissionHandler {
        &self.handler
    }

    /// Loads what a page view shows, consuming any pending flash.
    #[tracing::instrument(skip(self))]
    pub async fn view(&self, session_id: SessionId) -> Result<PageSnapshot, DomainError> {
        let page = self
            .store
            .update(session_id, |session| session.take_page())
            .await?;
        Ok(page)
    }

    /// Handles an add-product submission for a session.
    #[tracing::instrument(skip(self, form))]
    pub async fn submit(
        &self,
        session_id: SessionId,
        form: RawProductForm,
    ) -> Result<Outcome, DomainError> {
        let handler = &self.handler;
        let outcome = self
            .store
            .update(session_id, move |session| handler.handle(&form, session))
            .await?;
        Ok(outcome)
    }
}
