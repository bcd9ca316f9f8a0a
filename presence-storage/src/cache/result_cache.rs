//! Time-boxed memoization of producer results.
//!
//! One mutex guards the whole entry table and is held across
//! "check staleness, possibly reload, store". Concurrent callers for any key
//! therefore wait for an in-flight reload and then reuse its entry.

use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use presence_core::TimestampMs;
use tokio::sync::Mutex;

use super::clock::{Clock, SystemClock};
use super::freshness::CacheRead;

/// Identifies a cached producer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Parsed attendance log.
    PresenceData,
    /// Parsed user directory.
    UserDirectory,
}

impl CacheKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheKey::PresenceData => "presence_data",
            CacheKey::UserDirectory => "user_directory",
        }
    }
}

/// Configuration for the result cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Entries at least this old are recomputed on the next read.
    pub staleness: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            staleness: Duration::from_millis(600),
        }
    }
}

impl CacheConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the staleness window.
    pub fn with_staleness(mut self, staleness: Duration) -> Self {
        self.staleness = staleness;
        self
    }

    fn staleness_ms(&self) -> i64 {
        i64::try_from(self.staleness.as_millis()).unwrap_or(i64::MAX)
    }
}

/// Statistics about cache usage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entry_count: u64,
}

impl CacheStats {
    /// Calculate the hit rate (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

struct CacheEntry {
    data: Arc<dyn Any + Send + Sync>,
    timestamp: TimestampMs,
}

/// Result cache keyed by [`CacheKey`], with an injected clock.
pub struct ResultCache<C: Clock = SystemClock> {
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
    clock: C,
    config: CacheConfig,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ResultCache<SystemClock> {
    /// Create a cache driven by the wall clock.
    pub fn new(config: CacheConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> ResultCache<C> {
    pub fn with_clock(config: CacheConfig, clock: C) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
            config,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Return the cached value for `key`, running `producer` when the entry
    /// is missing or stale.
    ///
    /// A failing producer leaves any existing entry untouched and its error
    /// is returned as-is.
    pub async fn get_or_load<V, E, F, Fut>(
        &self,
        key: CacheKey,
        producer: F,
    ) -> Result<CacheRead<Arc<V>>, E>
    where
        V: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let mut entries = self.entries.lock().await;
        let now = self.clock.now_ms();

        if let Some(entry) = entries.get(&key) {
            if now - entry.timestamp < self.config.staleness_ms() {
                match Arc::clone(&entry.data).downcast::<V>() {
                    Ok(data) => {
                        self.hits.fetch_add(1, Ordering::Relaxed);
                        return Ok(CacheRead::from_cache(data, entry.timestamp));
                    }
                    Err(_) => {
                        tracing::warn!(
                            key = key.as_str(),
                            "Cached value has unexpected type, reloading"
                        );
                    }
                }
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(key = key.as_str(), "Cache miss, running producer");
        let data = Arc::new(producer().await?);
        entries.insert(
            key,
            CacheEntry {
                data: Arc::clone(&data) as Arc<dyn Any + Send + Sync>,
                timestamp: now,
            },
        );
        Ok(CacheRead::from_producer(data, now))
    }

    /// Drop the entry for `key`. Returns whether an entry existed.
    pub async fn invalidate(&self, key: CacheKey) -> bool {
        self.entries.lock().await.remove(&key).is_some()
    }

    pub async fn stats(&self) -> CacheStats {
        let entry_count = self.entries.lock().await.len() as u64;
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entry_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::clock::ManualClock;
    use std::convert::Infallible;
    use std::sync::atomic::AtomicUsize;

    fn manual_cache(staleness_ms: u64) -> ResultCache<Arc<ManualClock>> {
        ResultCache::with_clock(
            CacheConfig::new().with_staleness(Duration::from_millis(staleness_ms)),
            Arc::new(ManualClock::new(10_000)),
        )
    }

    async fn load_counted(
        cache: &ResultCache<Arc<ManualClock>>,
        calls: &AtomicUsize,
    ) -> CacheRead<Arc<Vec<u32>>> {
        let result: Result<_, Infallible> = cache
            .get_or_load(CacheKey::PresenceData, || async {
                let n = calls.fetch_add(1, Ordering::SeqCst) as u32;
                Ok(vec![n])
            })
            .await;
        result.unwrap()
    }

    #[tokio::test]
    async fn test_reads_within_window_reuse_entry() {
        let cache = manual_cache(600);
        let calls = AtomicUsize::new(0);

        let first = load_counted(&cache, &calls).await;
        cache.clock().advance_ms(599);
        let second = load_counted(&cache, &calls).await;

        assert!(!first.was_cache_hit());
        assert!(second.was_cache_hit());
        assert_eq!(first.cached_at(), second.cached_at());
        assert!(Arc::ptr_eq(first.value(), second.value()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_reads_after_window_reload() {
        let cache = manual_cache(600);
        let calls = AtomicUsize::new(0);

        let first = load_counted(&cache, &calls).await;
        cache.clock().advance_ms(600);
        let second = load_counted(&cache, &calls).await;

        assert!(!second.was_cache_hit());
        assert_ne!(first.cached_at(), second.cached_at());
        assert_eq!(second.cached_at(), 10_600);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_previous_entry() {
        let cache = manual_cache(600);
        let calls = AtomicUsize::new(0);
        load_counted(&cache, &calls).await;

        cache.clock().advance_ms(1_000);
        let failed: Result<CacheRead<Arc<Vec<u32>>>, &str> = cache
            .get_or_load(CacheKey::PresenceData, || async { Err("unreadable") })
            .await;
        assert_eq!(failed.unwrap_err(), "unreadable");

        // Back inside the window of the original entry, it is still served.
        cache.clock().set_ms(10_100);
        let read = load_counted(&cache, &calls).await;
        assert!(read.was_cache_hit());
        assert_eq!(read.cached_at(), 10_000);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let cache = manual_cache(600);
        let presence: Result<_, Infallible> = cache
            .get_or_load(CacheKey::PresenceData, || async { Ok(1u8) })
            .await;
        let users: Result<_, Infallible> = cache
            .get_or_load(CacheKey::UserDirectory, || async { Ok("users".to_string()) })
            .await;

        assert_eq!(**presence.unwrap().value(), 1u8);
        assert_eq!(users.unwrap().value().as_str(), "users");
        assert_eq!(cache.stats().await.entry_count, 2);
    }

    #[tokio::test]
    async fn test_type_mismatch_reloads() {
        let cache = manual_cache(600);
        let _: Result<_, Infallible> = cache
            .get_or_load(CacheKey::PresenceData, || async { Ok(1u8) })
            .await;
        let read: Result<_, Infallible> = cache
            .get_or_load(CacheKey::PresenceData, || async { Ok(2u16) })
            .await;
        let read = read.unwrap();
        assert!(!read.was_cache_hit());
        assert_eq!(**read.value(), 2u16);
    }

    #[tokio::test]
    async fn test_invalidate_and_stats() {
        let cache = manual_cache(600);
        let calls = AtomicUsize::new(0);
        load_counted(&cache, &calls).await;
        load_counted(&cache, &calls).await;

        let stats = cache.stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert!((stats.hit_rate() - 0.5).abs() < 0.001);

        assert!(cache.invalidate(CacheKey::PresenceData).await);
        assert!(!cache.invalidate(CacheKey::PresenceData).await);
        load_counted(&cache, &calls).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_callers_run_producer_once() {
        let cache = Arc::new(ResultCache::new(
            CacheConfig::new().with_staleness(Duration::from_secs(60)),
        ));
        let calls = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let cache = Arc::clone(&cache);
            let calls = Arc::clone(&calls);
            handles.push(tokio::spawn(async move {
                let read: Result<_, Infallible> = cache
                    .get_or_load(CacheKey::PresenceData, || async {
                        calls.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(20)).await;
                        Ok(vec![1u32, 2, 3])
                    })
                    .await;
                read.unwrap().cached_at()
            }));
        }

        let mut stamps = Vec::new();
        for handle in handles {
            stamps.push(handle.await.unwrap());
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(stamps.windows(2).all(|pair| pair[0] == pair[1]));
    }

    #[test]
    fn test_cache_config_builder() {
        let config = CacheConfig::new().with_staleness(Duration::from_secs(10));
        assert_eq!(config.staleness, Duration::from_secs(10));
        assert_eq!(config.staleness_ms(), 10_000);
        assert_eq!(CacheConfig::default().staleness, Duration::from_millis(600));
    }
}
