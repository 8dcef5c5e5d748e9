//! Expiry Sweep Task
//!
//! Optional background task that periodically removes expired cache entries.
//! Expiry is already enforced lazily on reads and writes, so the sweep only
//! returns memory earlier; it never changes what a read observes.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{Clock, SharedCache, Weigh};

/// Shortest interval the sweep task will tick at.
pub const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(10);

/// Spawns a task that purges expired entries every `interval`.
///
/// Intervals below [`MIN_SWEEP_INTERVAL`] (including zero) are raised to it.
/// The returned handle is aborted on shutdown.
pub fn spawn_sweep_task<V, C>(cache: SharedCache<V, C>, interval: Duration) -> JoinHandle<()>
where
    V: Clone + Weigh + Send + 'static,
    C: Clock + 'static,
{
    let interval = interval.max(MIN_SWEEP_INTERVAL);

    tokio::spawn(async move {
        info!(interval_ms = interval.as_millis() as u64, "starting cache sweep task");

        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let removed = cache.purge_expired();
            if removed > 0 {
                info!(removed, "cache sweep removed expired entries");
            } else {
                debug!("cache sweep found no expired entries");
            }
        }
    })
}
