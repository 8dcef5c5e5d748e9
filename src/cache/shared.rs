//! Shared Cache Module
//!
//! Thread-safe handle over a [`CacheStore`] plus the read-through
//! `get_or_set` operations.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::cache::{CacheStats, CacheStore, Clock, EntryInfo, SystemClock, Weigh};
use crate::config::CacheConfig;

// == Shared Cache ==
/// Cloneable handle to one cache store.
///
/// Every operation takes the store's exclusive lock for its own duration
/// only. Clones share the same store.
pub struct SharedCache<V, C = SystemClock> {
    inner: Arc<Mutex<CacheStore<V, C>>>,
}

impl<V, C> Clone for SharedCache<V, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V, C> fmt::Debug for SharedCache<V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedCache").finish_non_exhaustive()
    }
}

impl<V: Clone + Weigh> SharedCache<V, SystemClock> {
    /// Creates a shared cache on the system clock.
    pub fn new(config: CacheConfig) -> Self {
        Self::from_store(CacheStore::new(config))
    }
}

impl<V: Clone + Weigh, C: Clock> SharedCache<V, C> {
    /// Creates a shared cache driven by a custom clock.
    pub fn with_clock(config: CacheConfig, clock: C) -> Self {
        Self::from_store(CacheStore::with_clock(config, clock))
    }

    /// Wraps an existing store.
    pub fn from_store(store: CacheStore<V, C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    pub fn get(&self, key: &str) -> Option<V> {
        self.inner.lock().get(key)
    }

    /// See [`CacheStore::get_if`]; `accept` runs under the lock.
    pub fn get_if<F>(&self, key: &str, accept: F) -> Option<V>
    where
        F: FnOnce(&V) -> bool,
    {
        self.inner.lock().get_if(key, accept)
    }

    pub fn set(&self, key: &str, value: V, ttl_seconds: i64) {
        self.inner.lock().set(key, value, ttl_seconds);
    }

    // == Get Or Set ==
    /// Returns the cached value for `key`, or loads, stores and returns it.
    ///
    /// The loader runs without the store lock held. A loader error is
    /// returned unchanged and nothing is cached. Concurrent callers that
    /// miss on the same key each run their own loader.
    pub async fn get_or_set<F, Fut, E>(&self, key: &str, ttl_seconds: i64, loader: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(key) {
            return Ok(value);
        }

        let value = loader().await?;
        self.set(key, value.clone(), ttl_seconds);
        Ok(value)
    }

    /// Blocking variant of [`get_or_set`](Self::get_or_set) for synchronous loaders.
    pub fn get_or_set_with<F, E>(&self, key: &str, ttl_seconds: i64, loader: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(value) = self.get(key) {
            return Ok(value);
        }

        let value = loader()?;
        self.set(key, value.clone(), ttl_seconds);
        Ok(value)
    }

    pub fn delete(&self, key: &str) -> bool {
        self.inner.lock().delete(key)
    }

    pub fn clear(&self) -> usize {
        self.inner.lock().clear()
    }

    pub fn entries(&self) -> Vec<EntryInfo> {
        self.inner.lock().entries()
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    pub fn purge_expired(&self) -> usize {
        self.inner.lock().purge_expired()
    }

    pub fn reconfigure(&self, config: CacheConfig) {
        self.inner.lock().reconfigure(config);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.lock().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::{oneshot, Barrier};

    fn test_cache() -> (SharedCache<String, ManualClock>, ManualClock) {
        let clock = ManualClock::new(0);
        let cache = SharedCache::with_clock(CacheConfig::default(), clock.clone());
        (cache, clock)
    }

    #[tokio::test]
    async fn test_get_or_set_loads_once() {
        let (cache, _) = test_cache();
        let calls = &AtomicUsize::new(0);

        let load = move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>("loaded".to_string())
        };

        assert_eq!(cache.get_or_set("site", 60, load).await, Ok("loaded".to_string()));
        assert_eq!(cache.get("site"), Some("loaded".to_string()));
        assert_eq!(cache.get_or_set("site", 60, load).await, Ok("loaded".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_get_or_set_failure_propagates_and_caches_nothing() {
        let (cache, _) = test_cache();

        let result = cache
            .get_or_set("site", 60, || async { Err::<String, _>("db down") })
            .await;
        assert_eq!(result, Err("db down"));
        assert!(!cache.contains_key("site"));

        let retried = cache
            .get_or_set("site", 60, || async { Ok::<_, &str>("ok".to_string()) })
            .await;
        assert_eq!(retried, Ok("ok".to_string()));
    }

    #[tokio::test]
    async fn test_get_or_set_reloads_after_expiry() {
        let (cache, clock) = test_cache();
        let calls = &AtomicUsize::new(0);
        let load = move || async move {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, ()>(format!("v{n}"))
        };

        assert_eq!(cache.get_or_set("k", 1, load).await, Ok("v0".to_string()));
        clock.advance(Duration::from_secs(1));
        assert_eq!(cache.get_or_set("k", 1, load).await, Ok("v1".to_string()));
    }

    #[tokio::test]
    async fn test_loader_runs_without_holding_lock() {
        let (cache, _) = test_cache();
        let (release, gate) = oneshot::channel::<()>();

        let slow = {
            let cache = cache.clone();
            tokio::spawn(async move {
                cache
                    .get_or_set("slow", 60, || async move {
                        gate.await.map_err(|_| "gate dropped")?;
                        Ok::<_, &str>("slow-value".to_string())
                    })
                    .await
            })
        };

        tokio::task::yield_now().await;
        cache.set("fast", "fast-value".to_string(), 60);
        assert_eq!(cache.get("fast"), Some("fast-value".to_string()));

        release.send(()).expect("loader still waiting");
        assert_eq!(slow.await.expect("task panicked"), Ok("slow-value".to_string()));
        assert_eq!(cache.get("slow"), Some("slow-value".to_string()));
    }

    #[tokio::test]
    async fn test_concurrent_cold_misses_each_run_loader() {
        let (cache, _) = test_cache();
        let calls = &AtomicUsize::new(0);
        let barrier = &Barrier::new(2);

        let load = move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            barrier.wait().await;
            Ok::<_, ()>("v".to_string())
        };

        let (a, b) = tokio::join!(cache.get_or_set("cold", 60, load), cache.get_or_set("cold", 60, load));

        assert_eq!(a, Ok("v".to_string()));
        assert_eq!(b, Ok("v".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_get_or_set_with_sync_loader() {
        let (cache, _) = test_cache();

        let value = cache.get_or_set_with("k", 60, || Ok::<_, ()>("v".to_string()));
        assert_eq!(value, Ok("v".to_string()));

        let cached = cache.get_or_set_with("k", 60, || Err(()));
        assert_eq!(cached, Ok("v".to_string()));
    }

    #[test]
    fn test_threads_respect_capacity() {
        let cache: SharedCache<String, ManualClock> =
            SharedCache::with_clock(CacheConfig::new(50, 1024 * 1024), ManualClock::new(0));

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let cache = cache.clone();
                std::thread::spawn(move || {
                    for i in 0..200 {
                        cache.set(&format!("t{t}-k{i}"), "value".to_string(), 60);
                        let _ = cache.get(&format!("t{t}-k{}", i / 2));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().expect("writer thread panicked");
        }

        let stats = cache.stats();
        assert_eq!(stats.size, 50);
        assert_eq!(stats.hits + stats.misses, 8 * 200);
        assert_eq!(stats.evictions, 8 * 200 - 50);
    }

    #[test]
    fn test_clones_share_store() {
        let (cache, _) = test_cache();
        let other = cache.clone();

        cache.set("a", "1".to_string(), 60);
        assert_eq!(other.get("a"), Some("1".to_string()));
        assert_eq!(other.clear(), 1);
        assert!(cache.is_empty());
    }
}
