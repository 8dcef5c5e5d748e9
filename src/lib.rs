//! Read-through cache
//!
//! In-process cache for hot, low-churn reads with TTL expiry, FIFO eviction,
//! soft memory limits and an admin inspection surface.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod facade;
pub mod keys;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{CacheStats, CacheStore, EntryInfo, SharedCache};
pub use config::{CacheConfig, Config};
pub use facade::{
    clear_cache_store, delete_cached_value, delete_entry, get_cache_stats, get_cached_value,
    get_or_set_cached_value, get_or_set_cached_value_with, global_cache, initialize_cache,
    list_entries, set_cached_value, CachedValue, ProcessCache,
};
pub use tasks::spawn_sweep_task;
