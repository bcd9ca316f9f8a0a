//! Presence Storage - Data Sources and Result Cache
//!
//! Reads the attendance log and the user directory from disk and memoizes
//! the parsed results for a short staleness window.

pub mod cache;
pub mod directory;
pub mod loader;

pub use cache::{
    CacheConfig, CacheKey, CacheRead, CacheStats, Clock, ManualClock, ResultCache, SystemClock,
};
pub use directory::{load_user_directory, parse_user_directory};
pub use loader::{load_presence, parse_record, read_presence};
