//! Cache Statistics Module
//!
//! Tracks read outcomes and expirations.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Number of reads that returned a value
    pub hits: u64,
    /// Number of reads that found nothing (key absent or expired)
    pub misses: u64,
    /// Number of entries removed because they expired, lazily or by sweep
    pub expirations: u64,
    /// Current number of entries in the cache, expired ones included
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Expirations ==
    /// Adds `count` expired removals.
    pub fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }

    // == Update Entry Count ==
    /// Updates the total entries count.
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
