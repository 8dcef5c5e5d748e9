//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, and evictions.
//! Counters are cumulative for the life of the store; `clear` does not reset them.

use serde::Serialize;

// == Stats Counters ==
/// Running counters owned by the store.
#[derive(Debug, Clone, Default)]
pub struct StatsCounters {
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals (key absent or expired)
    pub misses: u64,
    /// Number of live entries removed to satisfy capacity limits
    pub evictions: u64,
    /// Number of expired entries removed (lazily or by a sweep)
    pub expirations: u64,
}

impl StatsCounters {
    // == Constructor ==
    /// Creates new counters, all at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Record Hit ==
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Eviction ==
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Record Expirations ==
    pub fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        ratio(self.hits, self.hits + self.misses)
    }

    // == Miss Rate ==
    /// Returns misses / (hits + misses), or 0.0 if no lookups have been made.
    pub fn miss_rate(&self) -> f64 {
        ratio(self.misses, self.hits + self.misses)
    }
}

fn ratio(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}

// == Cache Stats ==
/// Point-in-time statistics snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheStats {
    /// Entries physically present
    pub size: usize,
    /// Configured entry limit
    pub max_size: usize,
    /// Configured soft memory limit
    pub max_memory_bytes: usize,
    /// Sum of estimated entry sizes
    pub memory_bytes_used: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
    pub hit_rate: f64,
    pub miss_rate: f64,
}
