use std::sync::Arc;

use buildcheck_core::catalog::Catalog;

use crate::config::ServerConfig;
use crate::sessions::SessionStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Read-only component catalog shared by every session.
    pub catalog: Arc<Catalog>,
    /// Live build sessions.
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(config: ServerConfig, catalog: Catalog) -> Self {
        let catalog = Arc::new(catalog);
        let sessions = Arc::new(SessionStore::new(Arc::clone(&catalog), config.max_sessions));
        Self {
            config: Arc::new(config),
            catalog,
            sessions,
        }
    }
}
