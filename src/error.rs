//! Error types for the cache crate
//!
//! Cache operations themselves never fail; errors only arise while loading
//! configuration.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache crate.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CacheError {
    /// An environment variable held a value that could not be parsed
    #[error("Invalid value for {name}: {value:?}")]
    InvalidEnvVar { name: String, value: String },

    /// Configuration values are inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache crate.
pub type Result<T> = std::result::Result<T, CacheError>;
