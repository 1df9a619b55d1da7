//! Cache Module
//!
//! Provides an in-memory key-value cache with per-entry TTL expiration.

use std::time::Duration;

mod clock;
mod entry;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use shared::SharedCache;
pub use stats::CacheStats;
pub use store::TtlCache;

// == Public Constants ==
/// TTL applied when neither the caller nor the configuration supplies one
pub const DEFAULT_TTL: Duration = Duration::from_millis(60_000);

/// Cache for memoized JSON API responses
pub type ResponseCache = SharedCache<serde_json::Value>;
