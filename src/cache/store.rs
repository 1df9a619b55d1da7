//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with TTL expiration.

use std::collections::HashMap;
use std::time::Duration;

use crate::cache::clock::duration_to_ms;
use crate::cache::{CacheEntry, CacheStats, Clock, SystemClock, DEFAULT_TTL};

// == TTL Cache ==
/// Key-value storage where every entry carries an expiry.
///
/// Expired entries are treated as absent. They are removed lazily when `get`
/// or `has` touches them, or eagerly by `cleanup`.
#[derive(Debug)]
pub struct TtlCache<T, C = SystemClock> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<T>>,
    /// TTL applied when `set` is called without one
    default_ttl: Duration,
    /// Time source for expiry stamps and checks
    clock: C,
    /// Read and expiration counters
    stats: CacheStats,
}

impl<T> TtlCache<T, SystemClock> {
    // == Constructor ==
    /// Creates an empty cache with the one minute default TTL.
    pub fn new() -> Self {
        Self::with_default_ttl(DEFAULT_TTL)
    }

    /// Creates an empty cache with the given default TTL.
    pub fn with_default_ttl(default_ttl: Duration) -> Self {
        Self::with_clock(default_ttl, SystemClock)
    }
}

impl<T> Default for TtlCache<T, SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: Clock> TtlCache<T, C> {
    /// Creates an empty cache reading time from `clock`.
    pub fn with_clock(default_ttl: Duration, clock: C) -> Self {
        Self {
            entries: HashMap::new(),
            default_ttl,
            clock,
            stats: CacheStats::new(),
        }
    }

    // == Set ==
    /// Stores `data` under `key`, replacing any previous entry.
    ///
    /// The entry expires `ttl` from now, or the default TTL if `ttl` is None.
    pub fn set(&mut self, key: impl Into<String>, data: T, ttl: Option<Duration>) {
        let ttl_ms = duration_to_ms(ttl.unwrap_or(self.default_ttl));
        let entry = CacheEntry::new(data, self.clock.now_ms(), ttl_ms);
        self.entries.insert(key.into(), entry);
    }

    // == Get ==
    /// Retrieves the data stored under `key`.
    ///
    /// Returns None if the key is absent or expired. An expired entry is
    /// removed as part of this call.
    pub fn get(&mut self, key: &str) -> Option<&T> {
        if self.is_live(key) {
            self.stats.record_hit();
            self.entries.get(key).map(|entry| &entry.data)
        } else {
            self.stats.record_miss();
            None
        }
    }

    // == Has ==
    /// Checks whether `key` holds an unexpired entry, evicting it if expired.
    pub fn has(&mut self, key: &str) -> bool {
        self.is_live(key)
    }

    // == Delete ==
    /// Removes `key`. Returns true if an entry was present.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Clear ==
    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // == Cleanup ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup(&mut self) -> usize {
        let now = self.clock.now_ms();
        let before = self.entries.len();

        self.entries.retain(|_, entry| !entry.is_expired(now));

        let removed = before - self.entries.len();
        self.stats.record_expirations(removed);
        removed
    }

    // == Size ==
    /// Returns the number of stored entries.
    ///
    /// Expired entries that nothing has touched yet are still counted.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if no entries are stored, expired ones included.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Default TTL ==
    /// Returns the TTL applied when `set` is called without one.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Liveness Check ==
    /// Returns true if `key` is present and unexpired. Expired entries are
    /// removed on the way.
    fn is_live(&mut self, key: &str) -> bool {
        let now = self.clock.now_ms();
        match self.entries.get(key).map(|entry| entry.is_expired(now)) {
            Some(true) => {
                self.entries.remove(key);
                self.stats.record_expirations(1);
                false
            }
            Some(false) => true,
            None => false,
        }
    }
}
