//! Response DTOs for the admin inspection API
//!
//! Defines the structure of outgoing HTTP response bodies. Cache statistics
//! are served as [`CacheStats`](crate::cache::CacheStats) directly.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cache::EntryInfo;

/// One row of GET /cache/entries. Values are never exposed.
#[derive(Debug, Clone, Serialize)]
pub struct EntryResponse {
    pub key: String,
    pub size_bytes: usize,
    pub sequence: u64,
    pub inserted_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub expired: bool,
    pub ttl_remaining_ms: u64,
}

impl From<EntryInfo> for EntryResponse {
    fn from(info: EntryInfo) -> Self {
        Self {
            key: info.key,
            size_bytes: info.size_bytes,
            sequence: info.sequence,
            inserted_at: from_unix_ms(info.inserted_at),
            expires_at: from_unix_ms(info.expires_at),
            expired: info.expired,
            ttl_remaining_ms: info.ttl_remaining_ms,
        }
    }
}

fn from_unix_ms(ms: u64) -> DateTime<Utc> {
    i64::try_from(ms)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Response body for GET /cache/entries
#[derive(Debug, Clone, Serialize)]
pub struct EntriesResponse {
    pub count: usize,
    pub entries: Vec<EntryResponse>,
}

impl EntriesResponse {
    pub fn new(entries: Vec<EntryResponse>) -> Self {
        Self {
            count: entries.len(),
            entries,
        }
    }
}

/// Response body for DELETE /cache/entries/:key
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The key that was deleted
    pub key: String,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' deleted successfully", key),
            key,
        }
    }
}

/// Response body for DELETE /cache
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// Number of entries removed
    pub cleared: usize,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
