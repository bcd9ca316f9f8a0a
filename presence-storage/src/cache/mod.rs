//! Time-boxed result cache.
//!
//! Producers (the attendance loader, the directory parser) are wrapped so
//! that repeated reads inside the staleness window return the stored value
//! instead of re-reading the source files. Reads return [`CacheRead<T>`],
//! which carries the timestamp the value was produced at.
//!
//! # Example
//!
//! ```ignore
//! let cache = ResultCache::new(CacheConfig::new().with_staleness(Duration::from_millis(600)));
//! let read = cache
//!     .get_or_load(CacheKey::PresenceData, || async { load_presence(path) })
//!     .await?;
//! if read.was_cache_hit() {
//!     tracing::trace!(cached_at = read.cached_at(), "Served from cache");
//! }
//! ```

pub mod clock;
pub mod freshness;
pub mod result_cache;

pub use clock::{Clock, ManualClock, SystemClock};
pub use freshness::CacheRead;
pub use result_cache::{CacheConfig, CacheKey, CacheStats, ResultCache};
