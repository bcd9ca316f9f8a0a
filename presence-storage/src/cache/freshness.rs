//! Cache read results carrying their timestamp.

use presence_core::TimestampMs;

/// Result of a cache read, carrying when the value was produced.
///
/// Callers that care about freshness can inspect [`CacheRead::cached_at`]
/// and whether the read was served from the cache.
#[derive(Debug, Clone)]
pub struct CacheRead<T> {
    value: T,
    cached_at: TimestampMs,
    was_cache_hit: bool,
}

impl<T> CacheRead<T> {
    /// A read served from an existing entry.
    pub fn from_cache(value: T, cached_at: TimestampMs) -> Self {
        Self {
            value,
            cached_at,
            was_cache_hit: true,
        }
    }

    /// A read that ran the producer and stored its result.
    pub fn from_producer(value: T, cached_at: TimestampMs) -> Self {
        Self {
            value,
            cached_at,
            was_cache_hit: false,
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    /// When the value was produced, in milliseconds since the epoch.
    pub fn cached_at(&self) -> TimestampMs {
        self.cached_at
    }

    pub fn was_cache_hit(&self) -> bool {
        self.was_cache_hit
    }
}
