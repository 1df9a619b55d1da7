//! TTL Cleanup Task
//!
//! Background task that periodically sweeps expired cache entries.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::{Clock, SharedCache};

/// Shortest interval the sweep will run at
pub const MIN_CLEANUP_INTERVAL: Duration = Duration::from_millis(1);

/// Spawns a background task that periodically removes expired cache entries.
///
/// Without the sweep, keys that are written once and never read again would
/// stay in memory indefinitely. The task sleeps for `interval` between runs
/// and takes the cache's write lock for each sweep. Intervals shorter than
/// [`MIN_CLEANUP_INTERVAL`] are raised to it.
///
/// # Returns
/// A JoinHandle for the spawned task; abort it to stop sweeping.
///
/// # Example
/// ```ignore
/// let cache: SharedCache<String> = SharedCache::from_config(&config);
/// let cleanup_handle = spawn_cleanup_task(cache.clone(), config.cleanup_interval());
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task<T, C>(cache: SharedCache<T, C>, interval: Duration) -> JoinHandle<()>
where
    T: Send + Sync + 'static,
    C: Clock + 'static,
{
    let interval = effective_interval(interval);

    tokio::spawn(async move {
        info!("Starting TTL cleanup task with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.cleanup().await;

            if removed > 0 {
                info!("TTL cleanup: removed {} expired entries", removed);
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
        }
    })
}

fn effective_interval(requested: Duration) -> Duration {
    if requested < MIN_CLEANUP_INTERVAL {
        warn!(
            "Cleanup interval {:?} too short, using {:?}",
            requested, MIN_CLEANUP_INTERVAL
        );
        MIN_CLEANUP_INTERVAL
    } else {
        requested
    }
}
