//! Request DTOs for the admin inspection API
//!
//! Defines the query parameters accepted by the admin endpoints.

use serde::Deserialize;

/// Query string for GET /cache/entries
///
/// # Fields
/// - `prefix`: Only list keys starting with this prefix (e.g. `public-site|`)
/// - `include_expired`: Also list entries that expired but were not swept yet
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntriesQuery {
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default = "default_include_expired")]
    pub include_expired: bool,
}

fn default_include_expired() -> bool {
    true
}

impl EntriesQuery {
    /// Validates the query
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        match &self.prefix {
            Some(prefix) if prefix.is_empty() => Some("Prefix cannot be empty".to_string()),
            _ => None,
        }
    }

    /// Whether an entry with `key` and expiry state `expired` should be listed.
    pub fn matches(&self, key: &str, expired: bool) -> bool {
        if expired && !self.include_expired {
            return false;
        }
        self.prefix
            .as_deref()
            .map_or(true, |prefix| key.starts_with(prefix))
    }
}
