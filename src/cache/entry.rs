//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL and accounting metadata.

use serde::Serialize;

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Insertion timestamp (Unix milliseconds)
    pub inserted_at: u64,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
    /// Insertion sequence; lower values are evicted first
    pub sequence: u64,
    /// Estimated footprint of key and value
    pub size_bytes: usize,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry stamped at `now_ms`.
    ///
    /// A TTL of zero or less yields an entry that is already expired.
    pub fn new(value: V, now_ms: u64, ttl_seconds: i64, sequence: u64, size_bytes: usize) -> Self {
        Self {
            value,
            inserted_at: now_ms,
            expires_at: expiry_from_ttl(now_ms, ttl_seconds),
            sequence,
            size_bytes,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now_ms`.
    ///
    /// An entry is expired once the current time is greater than or equal
    /// to its expiration time.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms >= self.expires_at
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds, `0` once expired.
    pub fn ttl_remaining_ms(&self, now_ms: u64) -> u64 {
        self.expires_at.saturating_sub(now_ms)
    }

    /// Metadata view of this entry under `key`.
    pub fn info(&self, key: &str, now_ms: u64) -> EntryInfo {
        EntryInfo {
            key: key.to_string(),
            size_bytes: self.size_bytes,
            inserted_at: self.inserted_at,
            expires_at: self.expires_at,
            sequence: self.sequence,
            expired: self.is_expired(now_ms),
            ttl_remaining_ms: self.ttl_remaining_ms(now_ms),
        }
    }
}

// == Entry Info ==
/// Snapshot of an entry's metadata, without its value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryInfo {
    pub key: String,
    pub size_bytes: usize,
    /// Unix milliseconds
    pub inserted_at: u64,
    /// Unix milliseconds
    pub expires_at: u64,
    pub sequence: u64,
    /// Whether the entry was already stale when the snapshot was taken
    pub expired: bool,
    /// Milliseconds until expiry at snapshot time, `0` once expired
    pub ttl_remaining_ms: u64,
}

/// Absolute expiry for a TTL given in seconds.
fn expiry_from_ttl(now_ms: u64, ttl_seconds: i64) -> u64 {
    if ttl_seconds <= 0 {
        return now_ms;
    }
    now_ms.saturating_add((ttl_seconds as u64).saturating_mul(1000))
}
