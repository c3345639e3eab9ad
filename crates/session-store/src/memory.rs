use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::{Result, SessionId, SessionStore, SessionStoreError, StoreOptions};

struct Entry<T> {
    state: T,
    last_seen: DateTime<Utc>,
}

impl<T> Entry<T> {
    fn new(state: T, now: DateTime<Utc>) -> Self {
        Self {
            state,
            last_seen: now,
        }
    }

    fn is_expired(&self, options: &StoreOptions, now: DateTime<Utc>) -> bool {
        // A clock step backwards yields a negative idle time; keep the session.
        (now - self.last_seen)
            .to_std()
            .map(|idle| idle > options.ttl)
            .unwrap_or(false)
    }
}

/// In-memory session store.
///
/// Sessions live for the lifetime of the process. Cloning the store
/// yields another handle to the same sessions.
pub struct InMemorySessionStore<T> {
    sessions: Arc<RwLock<HashMap<SessionId, Entry<T>>>>,
    options: StoreOptions,
}

impl<T> Clone for InMemorySessionStore<T> {
    fn clone(&self) -> Self {
        Self {
            sessions: Arc::clone(&self.sessions),
            options: self.options,
        }
    }
}

impl<T> Default for InMemorySessionStore<T> {
    fn default() -> Self {
        Self::with_options(StoreOptions::default())
    }
}

impl<T> InMemorySessionStore<T> {
    /// Creates an empty store with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store with the given lifetime and capacity.
    pub fn with_options(options: StoreOptions) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            options,
        }
    }

    /// Returns the options this store was created with.
    pub fn options(&self) -> StoreOptions {
        self.options
    }

    /// Clears all sessions.
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }
}

fn purge<T>(
    sessions: &mut HashMap<SessionId, Entry<T>>,
    options: &StoreOptions,
    now: DateTime<Utc>,
) -> usize {
    let before = sessions.len();
    sessions.retain(|_, entry| !entry.is_expired(options, now));
    let purged = before - sessions.len();
    if purged > 0 {
        metrics::counter!("sessions_expired_total").increment(purged as u64);
    }
    purged
}

#[async_trait]
impl<T> SessionStore<T> for InMemorySessionStore<T>
where
    T: Default + Clone + Send + Sync + 'static,
{
    async fn update<F, R>(&self, id: SessionId, f: F) -> Result<R>
    where
        F: FnOnce(&mut T) -> R + Send,
        R: Send,
    {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;

        let live = sessions
            .get(&id)
            .is_some_and(|entry| !entry.is_expired(&self.options, now));

        if !live {
            if sessions.remove(&id).is_some() {
                tracing::debug!(session_id = %id, "session expired, starting fresh");
                metrics::counter!("sessions_expired_total").increment(1);
            }

            if sessions.len() >= self.options.max_sessions {
                purge(&mut sessions, &self.options, now);
            }
            if sessions.len() >= self.options.max_sessions {
                tracing::warn!(
                    limit = self.options.max_sessions,
                    "refusing new session, store is full"
                );
                return Err(SessionStoreError::CapacityExceeded {
                    limit: self.options.max_sessions,
                });
            }

            metrics::counter!("sessions_created_total").increment(1);
            tracing::debug!(session_id = %id, "session created");
        }

        let entry = sessions
            .entry(id)
            .or_insert_with(|| Entry::new(T::default(), now));
        entry.last_seen = now;
        Ok(f(&mut entry.state))
    }

    async fn get(&self, id: SessionId) -> Result<Option<T>> {
        let now = Utc::now();
        let sessions = self.sessions.read().await;
        Ok(sessions
            .get(&id)
            .filter(|entry| !entry.is_expired(&self.options, now))
            .map(|entry| entry.state.clone()))
    }

    async fn remove(&self, id: SessionId) -> Result<bool> {
        Ok(self.sessions.write().await.remove(&id).is_some())
    }

    async fn purge_expired(&self) -> Result<usize> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        Ok(purge(&mut sessions, &self.options, now))
    }

    async fn session_count(&self) -> Result<usize> {
        Ok(self.sessions.read().await.len())
    }
}
