//! In-memory build sessions.
//!
//! Each session owns one [`CompatibilityEngine`] behind its own mutex, so
//! requests against the same build are serialised while different builds
//! proceed independently. Nothing is persisted.

use std::collections::HashMap;
use std::sync::Arc;

use buildcheck_core::catalog::Catalog;
use buildcheck_core::engine::CompatibilityEngine;
use buildcheck_core::error::CoreError;
use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

pub type SessionId = Uuid;

/// One user's in-progress build.
#[derive(Debug)]
pub struct BuildSession {
    pub engine: CompatibilityEngine,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

impl BuildSession {
    fn new(catalog: Arc<Catalog>) -> Self {
        let now = Utc::now();
        Self {
            engine: CompatibilityEngine::new(catalog),
            created_at: now,
            last_active: now,
        }
    }

    /// Mark the session as used now. Called by handlers after each access.
    pub fn touch(&mut self) {
        self.last_active = Utc::now();
    }
}

pub type SharedSession = Arc<Mutex<BuildSession>>;

/// Registry of live build sessions.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared across the application.
pub struct SessionStore {
    catalog: Arc<Catalog>,
    sessions: RwLock<HashMap<SessionId, SharedSession>>,
    max_sessions: usize,
}

impl SessionStore {
    pub fn new(catalog: Arc<Catalog>, max_sessions: usize) -> Self {
        Self {
            catalog,
            sessions: RwLock::new(HashMap::new()),
            max_sessions,
        }
    }

    /// Start a new, empty build.
    ///
    /// Fails with `Conflict` once `max_sessions` builds are live.
    pub async fn create(&self) -> Result<(SessionId, SharedSession), CoreError> {
        let mut sessions = self.sessions.write().await;
        if sessions.len() >= self.max_sessions {
            return Err(CoreError::Conflict(format!(
                "Session limit reached ({} active builds)",
                self.max_sessions
            )));
        }

        let id = Uuid::new_v4();
        let session = Arc::new(Mutex::new(BuildSession::new(Arc::clone(&self.catalog))));
        sessions.insert(id, Arc::clone(&session));
        tracing::debug!(session_id = %id, active = sessions.len(), "Build session created");
        Ok((id, session))
    }

    pub async fn get(&self, id: SessionId) -> Result<SharedSession, CoreError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    pub async fn remove(&self, id: SessionId) -> Result<(), CoreError> {
        match self.sessions.write().await.remove(&id) {
            Some(_) => {
                tracing::debug!(session_id = %id, "Build session removed");
                Ok(())
            }
            None => Err(not_found(id)),
        }
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drop sessions idle since before `cutoff`. Returns how many were evicted.
    ///
    /// A session whose lock is currently held is in use and always kept.
    pub async fn evict_idle_since(&self, cutoff: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| match session.try_lock() {
            Ok(guard) => guard.last_active >= cutoff,
            Err(_) => true,
        });
        before - sessions.len()
    }
}

fn not_found(id: SessionId) -> CoreError {
    CoreError::NotFound {
        entity: "Build session",
        id: id.to_string(),
    }
}
