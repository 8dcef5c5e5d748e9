//! Configuration Module
//!
//! Cache limits and the admin server configuration loaded from environment variables.

use std::env;

use serde::{Deserialize, Serialize};

/// Default entry limit.
pub const DEFAULT_MAX_ENTRIES: usize = 2000;

/// Default soft memory limit (100 MiB).
pub const DEFAULT_MAX_MEMORY_BYTES: usize = 100 * 1024 * 1024;

// == Cache Config ==
/// Capacity limits enforced on every write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// Soft limit on the sum of estimated entry sizes
    pub max_memory_bytes: usize,
}

impl CacheConfig {
    pub fn new(max_entries: usize, max_memory_bytes: usize) -> Self {
        Self {
            max_entries,
            max_memory_bytes,
        }
    }

    /// Clamps the entry limit to at least one so a write always lands.
    pub(crate) fn normalized(self) -> Self {
        Self {
            max_entries: self.max_entries.max(1),
            ..self
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            max_memory_bytes: DEFAULT_MAX_MEMORY_BYTES,
        }
    }
}

/// Admin server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// Soft memory limit in bytes
    pub max_memory_bytes: usize,
    /// HTTP server port
    pub server_port: u16,
    /// Periodic sweep interval in seconds, 0 disables the sweep task
    pub sweep_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 2000)
    /// - `CACHE_MAX_MEMORY_BYTES` - Soft memory limit (default: 104857600)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds (default: 0, disabled)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_entries: env_or("CACHE_MAX_ENTRIES", defaults.max_entries),
            max_memory_bytes: env_or("CACHE_MAX_MEMORY_BYTES", defaults.max_memory_bytes),
            server_port: env_or("SERVER_PORT", defaults.server_port),
            sweep_interval: env_or("SWEEP_INTERVAL", defaults.sweep_interval),
        }
    }

    /// Cache limits derived from this configuration.
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig::new(self.max_entries, self.max_memory_bytes).normalized()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            max_memory_bytes: DEFAULT_MAX_MEMORY_BYTES,
            server_port: 3000,
            sweep_interval: 0,
        }
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
