use std::time::Duration;

use async_trait::async_trait;

use crate::{Result, SessionId};

/// Default idle lifetime of a session, matching the usual 24 minute
/// server-side session lifetime of classic web stacks.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(1440);

/// Default ceiling on the number of live sessions.
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

/// Options controlling session lifetime and capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    /// A session idle for longer than this is treated as absent.
    pub ttl: Duration,

    /// Maximum number of live sessions held at once.
    pub max_sessions: usize,
}

impl StoreOptions {
    /// Creates options with the default lifetime and capacity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with a different idle lifetime.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Returns a copy with a different session ceiling.
    pub fn with_max_sessions(mut self, max_sessions: usize) -> Self {
        self.max_sessions = max_sessions;
        self
    }
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_SESSION_TTL,
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }
}

/// Core trait for session store implementations.
///
/// `T` is the per-session state. A session that does not exist yet (or
/// has expired) is initialized with `T::default()` the first time it is
/// updated. All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait SessionStore<T>: Send + Sync
where
    T: Default + Clone + Send + Sync + 'static,
{
    /// Runs `f` against the state of session `id` and returns its result.
    ///
    /// The closure runs while the store holds exclusive access to the
    /// session, so concurrent requests on one session cannot lose each
    /// other's writes. Touching a session refreshes its idle timer.
    ///
    /// Fails with `CapacityExceeded` only when `id` is not live and no
    /// room can be made for a new session.
    async fn update<F, R>(&self, id: SessionId, f: F) -> Result<R>
    where
        F: FnOnce(&mut T) -> R + Send,
        R: Send;

    /// Returns a snapshot of the session state without creating it.
    ///
    /// Expired sessions are reported as absent.
    async fn get(&self, id: SessionId) -> Result<Option<T>>;

    /// Removes a session. Returns whether it was present.
    async fn remove(&self, id: SessionId) -> Result<bool>;

    /// Drops every expired session and returns how many were removed.
    async fn purge_expired(&self) -> Result<usize>;

    /// Returns the number of sessions currently held, expired or not.
    async fn session_count(&self) -> Result<usize>;
}
