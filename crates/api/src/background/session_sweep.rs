//! Periodic eviction of idle build sessions.
//!
//! Sessions are never explicitly closed by most clients, so anything idle
//! longer than the configured TTL is dropped on a fixed interval.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio_util::sync::CancellationToken;

use crate::sessions::SessionStore;

/// Run the sweep loop until `cancel` is triggered.
pub async fn run(
    sessions: Arc<SessionStore>,
    ttl: Duration,
    interval: Duration,
    cancel: CancellationToken,
) {
    tracing::info!(
        ttl_secs = ttl.as_secs(),
        interval_secs = interval.as_secs(),
        "Session sweep started"
    );

    let ttl = match chrono::Duration::from_std(ttl) {
        Ok(ttl) => ttl,
        Err(e) => {
            tracing::error!(error = %e, "Session sweep: TTL out of range, sweep disabled");
            return;
        }
    };
    let mut ticker = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Session sweep stopping");
                break;
            }
            _ = ticker.tick() => {
                let evicted = sessions.evict_idle_since(Utc::now() - ttl).await;
                if evicted > 0 {
                    tracing::info!(evicted, "Session sweep: evicted idle builds");
                } else {
                    tracing::debug!("Session sweep: nothing to evict");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use buildcheck_core::catalog::Catalog;

    use super::*;

    #[tokio::test]
    async fn evicts_expired_sessions_then_stops_on_cancel() {
        let sessions = Arc::new(SessionStore::new(Arc::new(Catalog::builtin().unwrap()), 10));
        let (_, session) = sessions.create().await.unwrap();
        session.lock().await.last_active = Utc::now() - chrono::Duration::hours(3);

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run(
            Arc::clone(&sessions),
            Duration::from_secs(3600),
            Duration::from_secs(60),
            cancel.clone(),
        ));

        // First tick fires immediately.
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(sessions.session_count().await, 0);

        cancel.cancel();
        handle.await.unwrap();
    }
}
