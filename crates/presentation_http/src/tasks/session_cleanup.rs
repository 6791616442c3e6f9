//! Idle session expiry task
//!
//! Periodically evicts conversation sessions that have been idle longer than
//! the configured TTL.

use std::sync::Arc;
use std::time::Duration;

use application::ports::SessionStorePort;
use chrono::Utc;
use tracing::{debug, error, info};

/// Spawn a background task that evicts idle sessions every `interval`.
///
/// The first sweep happens one `interval` after startup. Returns a
/// `JoinHandle` that can be used to abort the task when shutting down.
pub fn spawn_session_cleanup_task(
    sessions: Arc<dyn SessionStorePort>,
    idle_ttl: Duration,
    interval: Duration,
) -> tokio::task::JoinHandle<()> {
    info!(
        idle_ttl_secs = idle_ttl.as_secs(),
        interval_secs = interval.as_secs(),
        "Starting session cleanup task"
    );

    let ttl = chrono::Duration::from_std(idle_ttl).unwrap_or(chrono::Duration::MAX);

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // Don't run immediately on startup
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let cutoff = Utc::now()
                .checked_sub_signed(ttl)
                .unwrap_or(chrono::DateTime::<Utc>::MIN_UTC);
            debug!(cutoff = %cutoff, "Running session cleanup");

            match sessions.evict_idle(cutoff).await {
                Ok(0) => debug!("No idle sessions to evict"),
                Ok(removed) => {
                    let remaining = sessions.session_count().await;
                    info!(
                        removed_count = removed,
                        remaining = remaining,
                        "Evicted idle sessions"
                    );
                }
                Err(e) => error!(error = %e, "Failed to evict idle sessions"),
            }
        }
    })
}
