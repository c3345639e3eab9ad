use thiserror::Error;

/// Errors that can occur when interacting with the session store.
#[derive(Debug, Error)]
pub enum SessionStoreError {
    /// A new session was requested while the store already holds
    /// the maximum number of live sessions.
    #[error("Session capacity exceeded: {limit} live sessions")]
    CapacityExceeded { limit: usize },
}

/// Result type for session store operations.
pub type Result<T> = std::result::Result<T, SessionStoreError>;
