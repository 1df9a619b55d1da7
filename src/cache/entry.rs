//! Cache Entry Module
//!
//! Defines a single cached payload together with its expiry timestamp.

// == Cache Entry ==
/// A stored payload and the instant after which it is no longer valid.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<T> {
    /// The stored payload, opaque to the cache
    pub data: T,
    /// Expiration timestamp (Unix milliseconds)
    pub expiry: i64,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates an entry that expires `ttl_ms` after `now_ms`.
    pub fn new(data: T, now_ms: i64, ttl_ms: i64) -> Self {
        Self {
            data,
            expiry: now_ms.saturating_add(ttl_ms),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now_ms`.
    ///
    /// Boundary condition: the comparison is strict, so an entry whose expiry
    /// equals the current instant is still valid. Every expiry check in the
    /// cache goes through this method.
    pub fn is_expired(&self, now_ms: i64) -> bool {
        self.expiry < now_ms
    }

    // == Time To Live ==
    /// Returns remaining lifetime in milliseconds, `0` once the expiry is reached.
    pub fn ttl_remaining_ms(&self, now_ms: i64) -> u64 {
        u64::try_from(self.expiry.saturating_sub(now_ms)).unwrap_or(0)
    }
}
