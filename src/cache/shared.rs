//! Shared Cache Module
//!
//! Thread-safe handle around [`TtlCache`] for use from async service code.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{CacheStats, Clock, SystemClock, TtlCache};
use crate::config::CacheConfig;

// == Shared Cache ==
/// Cloneable handle to a single cache instance.
///
/// The cache is built once by whatever wires up the service layer and the
/// handle is passed to every consumer. `get` and `has` take the write lock
/// because they remove expired entries.
#[derive(Debug)]
pub struct SharedCache<T, C = SystemClock> {
    inner: Arc<RwLock<TtlCache<T, C>>>,
}

impl<T, C> Clone for SharedCache<T, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> SharedCache<T, SystemClock> {
    /// Creates a handle around a cache using the configured default TTL.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(TtlCache::with_default_ttl(config.default_ttl()))
    }
}

impl<T, C: Clock> SharedCache<T, C> {
    /// Wraps an existing cache.
    pub fn new(cache: TtlCache<T, C>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(cache)),
        }
    }

    // == Set ==
    /// Stores `data` under `key`; see [`TtlCache::set`].
    pub async fn set(&self, key: impl Into<String>, data: T, ttl: Option<Duration>) {
        self.inner.write().await.set(key, data, ttl);
    }

    // == Has ==
    /// Checks whether `key` holds an unexpired entry, evicting it if expired.
    pub async fn has(&self, key: &str) -> bool {
        self.inner.write().await.has(key)
    }

    // == Delete ==
    /// Removes `key`. Returns true if an entry was present.
    pub async fn delete(&self, key: &str) -> bool {
        self.inner.write().await.delete(key)
    }

    // == Clear ==
    /// Removes every entry.
    pub async fn clear(&self) {
        self.inner.write().await.clear();
    }

    // == Cleanup ==
    /// Removes all expired entries and returns how many were dropped.
    pub async fn cleanup(&self) -> usize {
        self.inner.write().await.cleanup()
    }

    // == Size ==
    /// Returns the number of stored entries without evicting expired ones.
    pub async fn size(&self) -> usize {
        self.inner.read().await.size()
    }

    // == Default TTL ==
    /// Returns the TTL applied when `set` is called without one.
    pub async fn default_ttl(&self) -> Duration {
        self.inner.read().await.default_ttl()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub async fn stats(&self) -> CacheStats {
        self.inner.read().await.stats()
    }
}

impl<T: Clone, C: Clock> SharedCache<T, C> {
    // == Get ==
    /// Returns a copy of the data under `key` if present and unexpired.
    pub async fn get(&self, key: &str) -> Option<T> {
        self.inner.write().await.get(key).cloned()
    }

    // == Memoize ==
    /// Returns the cached value for `key`, or runs `fetch` and caches its result.
    ///
    /// A failed fetch is returned as-is and leaves the cache untouched. The
    /// lock is released while `fetch` runs, so two callers missing on the same
    /// key may both fetch; the later `set` wins.
    pub async fn get_or_try_insert_with<F, Fut, E>(
        &self,
        key: &str,
        ttl: Option<Duration>,
        fetch: F,
    ) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(hit) = self.get(key).await {
            debug!(key, "cache hit");
            return Ok(hit);
        }

        debug!(key, "cache miss, fetching");
        let fresh = fetch().await?;
        self.set(key, fresh.clone(), ttl).await;
        Ok(fresh)
    }
}
