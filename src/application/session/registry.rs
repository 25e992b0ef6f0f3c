//! Session registry: the live storefront sessions

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use tracing::{info, warn};

use crate::application::catalog::CatalogController;

/// One shopper's catalog state
pub struct StorefrontSession {
    pub id: String,
    pub controller: CatalogController,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

impl StorefrontSession {
    pub fn new(id: impl Into<String>, controller: CatalogController) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            controller,
            created_at: now,
            last_activity: now,
        }
    }

    pub fn touch(&mut self) {
        self.last_activity = Utc::now();
    }

    pub fn idle_for(&self, now: DateTime<Utc>) -> Duration {
        now.signed_duration_since(self.last_activity)
    }
}

/// Thread-safe registry of active sessions
pub struct SessionRegistry {
    sessions: DashMap<String, StorefrontSession>,
}

pub type SharedSessionRegistry = Arc<SessionRegistry>;

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    pub fn shared() -> SharedSessionRegistry {
        Arc::new(Self::new())
    }

    pub fn register(&self, session: StorefrontSession) {
        info!(session_id = session.id.as_str(), "Registering storefront session");
        self.sessions.insert(session.id.clone(), session);
    }

    /// Returns whether the session existed.
    pub fn unregister(&self, session_id: &str) -> bool {
        if self.sessions.remove(session_id).is_some() {
            info!(session_id, "Unregistered storefront session");
            true
        } else {
            warn!(session_id, "Attempted to unregister unknown session");
            false
        }
    }

    /// Run `f` against the session, marking it active.
    ///
    /// The entry stays locked while `f` runs, so `f` must not block.
    pub fn with_session<R>(
        &self,
        session_id: &str,
        f: impl FnOnce(&mut StorefrontSession) -> R,
    ) -> Option<R> {
        self.sessions.get_mut(session_id).map(|mut entry| {
            entry.touch();
            f(entry.value_mut())
        })
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.sessions.contains_key(session_id)
    }

    pub fn count(&self) -> usize {
        self.sessions.len()
    }

    /// Ids of sessions idle for longer than `max_idle` at `now`
    pub fn idle_sessions(&self, now: DateTime<Utc>, max_idle: Duration) -> Vec<String> {
        self.sessions
            .iter()
            .filter(|entry| entry.idle_for(now) > max_idle)
            .map(|entry| entry.key().clone())
            .collect()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
