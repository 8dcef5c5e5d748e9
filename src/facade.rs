//! Process-wide cache facade
//!
//! Free functions over the one cache shared by every request handler in the
//! process. Values of any `'static` type can be stored; a read with the wrong
//! type is treated as a miss.
//!
//! Handlers that can take the cache as a dependency should prefer injecting
//! [`global_cache`] (or their own [`SharedCache`]) over calling these directly.

use std::any::Any;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, OnceLock};

use serde::Serialize;
use tracing::{info, warn};

use crate::cache::weigh::json_size;
use crate::cache::{CacheStats, EntryInfo, SharedCache, Weigh};
use crate::config::CacheConfig;

/// Cache type held by the process.
pub type ProcessCache = SharedCache<CachedValue>;

static GLOBAL: OnceLock<ProcessCache> = OnceLock::new();

// == Cached Value ==
/// Type-erased cache value with its size measured at insertion.
#[derive(Clone)]
pub struct CachedValue {
    value: Arc<dyn Any + Send + Sync>,
    size_bytes: usize,
    type_name: &'static str,
}

impl CachedValue {
    /// Wraps `value`, weighing it by its JSON serialization.
    pub fn new<T>(value: T) -> Self
    where
        T: Serialize + Send + Sync + 'static,
    {
        Self {
            size_bytes: json_size(&value),
            value: Arc::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Whether the stored value is a `T`.
    pub fn is<T: 'static>(&self) -> bool {
        self.value.is::<T>()
    }

    /// Returns a copy of the value if it is a `T`.
    pub fn downcast<T: Clone + 'static>(&self) -> Option<T> {
        self.value.downcast_ref::<T>().cloned()
    }

    /// Name of the stored type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl Weigh for CachedValue {
    fn weigh(&self) -> usize {
        self.size_bytes
    }
}

impl fmt::Debug for CachedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedValue")
            .field("type_name", &self.type_name)
            .field("size_bytes", &self.size_bytes)
            .finish()
    }
}

// == Lifecycle ==
/// Installs the process cache, or reconfigures it if already installed.
///
/// With `None`, installs the defaults on first call and does nothing after.
/// With `Some`, later calls apply the new limits without clearing entries;
/// the next write brings the cache back within them.
pub fn initialize_cache(config: Option<CacheConfig>) {
    let mut installed = false;
    let cache = GLOBAL.get_or_init(|| {
        installed = true;
        SharedCache::new(config.unwrap_or_default())
    });

    if installed {
        let stats = cache.stats();
        info!(
            max_entries = stats.max_size,
            max_memory_bytes = stats.max_memory_bytes,
            "process cache initialized"
        );
    } else if let Some(config) = config {
        cache.reconfigure(config);
        info!(
            max_entries = config.max_entries,
            max_memory_bytes = config.max_memory_bytes,
            "process cache reconfigured"
        );
    }
}

/// The process cache, installed with defaults on first use.
pub fn global_cache() -> &'static ProcessCache {
    GLOBAL.get_or_init(|| SharedCache::new(CacheConfig::default()))
}

// == Typed Operations ==
/// Returns the cached value under `key`, if present, fresh and a `T`.
pub fn get_cached_value<T>(key: &str) -> Option<T>
where
    T: Clone + Send + Sync + 'static,
{
    let mut mismatched = None;
    let cached = global_cache().get_if(key, |value| {
        if value.is::<T>() {
            return true;
        }
        mismatched = Some(value.type_name());
        false
    });

    if let Some(stored) = mismatched {
        warn!(
            key,
            stored,
            requested = std::any::type_name::<T>(),
            "cached value has a different type"
        );
    }
    cached?.downcast::<T>()
}

/// Stores `value` under `key` for `ttl_seconds`.
pub fn set_cached_value<T>(key: &str, value: T, ttl_seconds: i64)
where
    T: Serialize + Send + Sync + 'static,
{
    global_cache().set(key, CachedValue::new(value), ttl_seconds);
}

/// Read-through lookup: returns the cached `T` or awaits `loader`, caches
/// its value and returns it. Loader errors are returned unchanged.
pub async fn get_or_set_cached_value<T, E, F, Fut>(key: &str, ttl_seconds: i64, loader: F) -> Result<T, E>
where
    T: Serialize + Clone + Send + Sync + 'static,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    if let Some(value) = get_cached_value::<T>(key) {
        return Ok(value);
    }
    loader().await.map(|value| remember(key, value, ttl_seconds))
}

/// Synchronous form of [`get_or_set_cached_value`].
pub fn get_or_set_cached_value_with<T, E, F>(key: &str, ttl_seconds: i64, loader: F) -> Result<T, E>
where
    T: Serialize + Clone + Send + Sync + 'static,
    F: FnOnce() -> Result<T, E>,
{
    if let Some(value) = get_cached_value::<T>(key) {
        return Ok(value);
    }
    loader().map(|value| remember(key, value, ttl_seconds))
}

/// Caches a freshly loaded value and hands it back.
fn remember<T>(key: &str, value: T, ttl_seconds: i64) -> T
where
    T: Serialize + Clone + Send + Sync + 'static,
{
    set_cached_value(key, value.clone(), ttl_seconds);
    value
}

pub fn delete_cached_value(key: &str) -> bool {
    global_cache().delete(key)
}

/// Removes every entry and returns how many there were.
pub fn clear_cache_store() -> usize {
    global_cache().clear()
}

pub fn get_cache_stats() -> CacheStats {
    global_cache().stats()
}

// == Admin Introspection ==
/// Metadata of every entry, oldest first. Does not affect hit/miss stats.
pub fn list_entries() -> Vec<EntryInfo> {
    global_cache().entries()
}

pub fn delete_entry(key: &str) -> bool {
    global_cache().delete(key)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use serde_json::json;

    // The process cache is shared by every test in this module.
    static SERIAL: Mutex<()> = Mutex::new(());

    #[derive(Debug, Clone, PartialEq, Serialize)]
    struct User {
        name: String,
    }

    #[test]
    fn test_initialize_defaults_and_idempotent() {
        let _guard = SERIAL.lock();
        initialize_cache(None);
        set_cached_value("facade:init", 1u32, 60);

        initialize_cache(None);

        let stats = get_cache_stats();
        assert_eq!(stats.max_size, 2000);
        assert_eq!(stats.max_memory_bytes, 100 * 1024 * 1024);
        assert_eq!(get_cached_value::<u32>("facade:init"), Some(1));
        delete_cached_value("facade:init");
    }

    #[test]
    fn test_reconfigure_keeps_entries() {
        let _guard = SERIAL.lock();
        initialize_cache(None);
        set_cached_value("facade:reconf", "v".to_string(), 60);

        initialize_cache(Some(CacheConfig::new(500, 1024 * 1024)));
        assert_eq!(get_cache_stats().max_size, 500);
        assert_eq!(get_cached_value::<String>("facade:reconf"), Some("v".to_string()));

        initialize_cache(Some(CacheConfig::default()));
        delete_cached_value("facade:reconf");
    }

    #[test]
    fn test_struct_round_trip() {
        let _guard = SERIAL.lock();
        let user = User {
            name: "Ayşe".to_string(),
        };

        set_cached_value("user:42", user.clone(), 60);

        assert_eq!(get_cached_value::<User>("user:42"), Some(user));
        assert!(delete_cached_value("user:42"));
    }

    #[test]
    fn test_overwrite_and_delete() {
        let _guard = SERIAL.lock();
        set_cached_value("k", "v1", 60);
        set_cached_value("k", "v2", 60);

        assert_eq!(get_cached_value::<&str>("k"), Some("v2"));
        assert!(!delete_cached_value("does-not-exist"));
        assert!(delete_entry("k"));
        assert_eq!(get_cached_value::<&str>("k"), None);
    }

    #[test]
    fn test_wrong_type_reads_as_absent() {
        let _guard = SERIAL.lock();
        set_cached_value("facade:typed", 7i64, 60);
        let before = get_cache_stats();

        assert_eq!(get_cached_value::<String>("facade:typed"), None);
        let after = get_cache_stats();
        assert_eq!(after.hits - before.hits, 0, "Type mismatch is not a hit");
        assert_eq!(after.misses - before.misses, 1);

        assert_eq!(get_cached_value::<i64>("facade:typed"), Some(7));
        assert_eq!(get_cache_stats().hits - after.hits, 1);
        delete_cached_value("facade:typed");
    }

    #[test]
    fn test_get_or_set_reloads_on_type_mismatch() {
        let _guard = SERIAL.lock();
        set_cached_value("facade:retype", 7i64, 60);
        let before = get_cache_stats();

        let loaded = get_or_set_cached_value_with("facade:retype", 60, || Ok::<_, ()>("seven".to_string()));
        assert_eq!(loaded, Ok("seven".to_string()));

        let after = get_cache_stats();
        assert_eq!(after.hits - before.hits, 0);
        assert_eq!(after.misses - before.misses, 1);
        assert_eq!(get_cached_value::<String>("facade:retype"), Some("seven".to_string()));
        delete_cached_value("facade:retype");
    }

    #[test]
    fn test_clear_counts_entries() {
        let _guard = SERIAL.lock();
        clear_cache_store();
        set_cached_value("a", json!({"n": 1}), 60);
        set_cached_value("b", json!({"n": 2}), 60);

        assert_eq!(list_entries().len(), 2);
        assert_eq!(clear_cache_store(), 2);
        assert_eq!(get_cached_value::<serde_json::Value>("a"), None);
        assert_eq!(get_cached_value::<serde_json::Value>("b"), None);
        assert_eq!(get_cache_stats().size, 0);
    }

    #[test]
    fn test_get_or_set_with_failure_then_success() {
        let _guard = SERIAL.lock();

        let failed = get_or_set_cached_value_with::<u64, _, _>("facade:load", 60, || Err("unavailable"));
        assert_eq!(failed, Err("unavailable"));
        assert_eq!(get_cached_value::<u64>("facade:load"), None);

        let loaded = get_or_set_cached_value_with("facade:load", 60, || Ok::<u64, &str>(9));
        assert_eq!(loaded, Ok(9));
        let cached = get_or_set_cached_value_with("facade:load", 60, || Err::<u64, _>("not called"));
        assert_eq!(cached, Ok(9));
        delete_cached_value("facade:load");
    }

    #[test]
    fn test_async_get_or_set() {
        let _guard = SERIAL.lock();

        let value = tokio_test::block_on(get_or_set_cached_value("public-site|1", 60, || async {
            Ok::<_, String>(json!({"id": 1, "published": true}))
        }));
        assert_eq!(value, Ok(json!({"id": 1, "published": true})));

        let entry = list_entries()
            .into_iter()
            .find(|e| e.key == "public-site|1")
            .expect("entry listed");
        assert_eq!(entry.size_bytes, "public-site|1".len() + r#"{"id":1,"published":true}"#.len());
        delete_entry("public-site|1");
    }

    #[test]
    fn test_cached_value_weight() {
        let value = CachedValue::new(vec![1, 2, 3]);
        assert_eq!(value.weigh(), "[1,2,3]".len());
        assert_eq!(value.downcast::<Vec<i32>>(), Some(vec![1, 2, 3]));
    }
}
