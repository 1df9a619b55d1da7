//! API Cache - In-memory TTL cache for memoizing API responses
//!
//! Entries expire after a per-entry time-to-live. Expired entries are dropped
//! when read, or in bulk by a periodic sweep.

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{ResponseCache, SharedCache, TtlCache};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use tasks::spawn_cleanup_task;
