//! Configuration Module
//!
//! Handles loading cache configuration from environment variables.

use std::env;
use std::time::Duration;

use tracing::warn;

use crate::error::{CacheError, Result};

const DEFAULT_TTL_VAR: &str = "API_CACHE_DEFAULT_TTL_MS";
const CLEANUP_INTERVAL_VAR: &str = "API_CACHE_CLEANUP_INTERVAL_MS";

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Default TTL in milliseconds for entries stored without an explicit TTL
    pub default_ttl_ms: u64,
    /// Background cleanup task interval in milliseconds
    pub cleanup_interval_ms: u64,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// Missing or unparsable values fall back to their defaults.
    ///
    /// # Environment Variables
    /// - `API_CACHE_DEFAULT_TTL_MS` - Default TTL in milliseconds (default: 60000)
    /// - `API_CACHE_CLEANUP_INTERVAL_MS` - Cleanup frequency in milliseconds (default: 30000)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok(), false).unwrap_or_default()
    }

    /// Like [`CacheConfig::from_env`], but unparsable or invalid values are errors.
    pub fn try_from_env() -> Result<Self> {
        let config = Self::from_lookup(|name| env::var(name).ok(), true)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the cleanup task cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.cleanup_interval_ms == 0 {
            return Err(CacheError::InvalidConfig(
                "cleanup interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the default TTL as a Duration.
    pub fn default_ttl(&self) -> Duration {
        Duration::from_millis(self.default_ttl_ms)
    }

    /// Returns the cleanup interval as a Duration.
    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_millis(self.cleanup_interval_ms)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>, strict: bool) -> Result<Self> {
        let defaults = Self::default();
        let mut config = Self {
            default_ttl_ms: parse_var(&lookup, DEFAULT_TTL_VAR, defaults.default_ttl_ms, strict)?,
            cleanup_interval_ms: parse_var(
                &lookup,
                CLEANUP_INTERVAL_VAR,
                defaults.cleanup_interval_ms,
                strict,
            )?,
        };

        // A zero interval would spin the sweep; strict callers get it from validate()
        if !strict && config.cleanup_interval_ms == 0 {
            warn!(
                "Ignoring {}=0, using default {}",
                CLEANUP_INTERVAL_VAR, defaults.cleanup_interval_ms
            );
            config.cleanup_interval_ms = defaults.cleanup_interval_ms;
        }
        Ok(config)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl_ms: 60_000,
            cleanup_interval_ms: 30_000,
        }
    }
}

fn parse_var(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: u64,
    strict: bool,
) -> Result<u64> {
    let Some(raw) = lookup(name) else {
        return Ok(default);
    };

    match raw.trim().parse() {
        Ok(value) => Ok(value),
        Err(_) if strict => Err(CacheError::InvalidEnvVar {
            name: name.to_string(),
            value: raw,
        }),
        Err(_) => {
            warn!("Ignoring invalid {}={:?}, using default {}", name, raw, default);
            Ok(default)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    // Tests that touch the process environment must not interleave
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.default_ttl(), Duration::from_secs(60));
        assert_eq!(config.cleanup_interval(), Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_lookup_defaults() {
        let config = CacheConfig::from_lookup(lookup_from(&[]), true).unwrap();
        assert_eq!(config, CacheConfig::default());
    }

    #[test]
    fn test_config_lookup_overrides() {
        let lookup = lookup_from(&[(DEFAULT_TTL_VAR, "1500"), (CLEANUP_INTERVAL_VAR, " 250 ")]);
        let config = CacheConfig::from_lookup(lookup, true).unwrap();

        assert_eq!(config.default_ttl_ms, 1_500);
        assert_eq!(config.cleanup_interval_ms, 250);
    }

    #[test]
    fn test_config_lenient_falls_back() {
        let lookup = lookup_from(&[(DEFAULT_TTL_VAR, "one minute")]);
        let config = CacheConfig::from_lookup(lookup, false).unwrap();

        assert_eq!(config.default_ttl_ms, 60_000);
    }

    #[test]
    fn test_config_strict_rejects_garbage() {
        let lookup = lookup_from(&[(CLEANUP_INTERVAL_VAR, "-5")]);
        let result = CacheConfig::from_lookup(lookup, true);

        assert_eq!(
            result,
            Err(CacheError::InvalidEnvVar {
                name: CLEANUP_INTERVAL_VAR.to_string(),
                value: "-5".to_string(),
            })
        );
    }

    #[test]
    fn test_config_zero_interval_invalid() {
        let config = CacheConfig {
            cleanup_interval_ms: 0,
            ..CacheConfig::default()
        };
        assert!(matches!(config.validate(), Err(CacheError::InvalidConfig(_))));
    }

    #[test]
    fn test_config_lenient_zero_interval_falls_back() {
        let lookup = lookup_from(&[(CLEANUP_INTERVAL_VAR, "0")]);
        let config = CacheConfig::from_lookup(lookup, false).unwrap();

        assert_eq!(config.cleanup_interval_ms, 30_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_env() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        env::remove_var(DEFAULT_TTL_VAR);
        env::remove_var(CLEANUP_INTERVAL_VAR);

        assert_eq!(CacheConfig::from_env(), CacheConfig::default());

        env::set_var(DEFAULT_TTL_VAR, "2500");
        env::set_var(CLEANUP_INTERVAL_VAR, "0");
        let config = CacheConfig::from_env();

        env::remove_var(DEFAULT_TTL_VAR);
        env::remove_var(CLEANUP_INTERVAL_VAR);
        assert_eq!(config.default_ttl_ms, 2_500);
        assert_eq!(config.cleanup_interval_ms, 30_000);
    }

    #[test]
    fn test_config_try_from_env() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        env::set_var(DEFAULT_TTL_VAR, "1000");
        env::set_var(CLEANUP_INTERVAL_VAR, "500");
        let valid = CacheConfig::try_from_env();

        env::set_var(CLEANUP_INTERVAL_VAR, "0");
        let zero = CacheConfig::try_from_env();

        env::set_var(CLEANUP_INTERVAL_VAR, "soon");
        let garbage = CacheConfig::try_from_env();

        env::remove_var(DEFAULT_TTL_VAR);
        env::remove_var(CLEANUP_INTERVAL_VAR);
        assert_eq!(
            valid,
            Ok(CacheConfig {
                default_ttl_ms: 1_000,
                cleanup_interval_ms: 500,
            })
        );
        assert!(matches!(zero, Err(CacheError::InvalidConfig(_))));
        assert!(matches!(garbage, Err(CacheError::InvalidEnvVar { .. })));
    }
}
