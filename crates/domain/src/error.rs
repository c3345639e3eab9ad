//! Domain error types.

use session_store::SessionStoreError;
use thiserror::Error;

/// Errors that can occur while serving inventory requests.
///
/// Form validation failures are not errors here; they are part of the
/// normal [`Outcome`](crate::Outcome) of a submission.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The session could not be loaded or created.
    #[error("Session store error: {0}")]
    SessionStore(#[from] SessionStoreError),
}
