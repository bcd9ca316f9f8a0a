//! API Configuration Module
//!
//! Data file locations and the cache staleness window. Configuration is
//! loaded from environment variables with defaults that point at the
//! bundled `runtime/` directory.

use std::path::PathBuf;
use std::time::Duration;

use presence_storage::CacheConfig;

const DEFAULT_DATA_CSV: &str = "runtime/data/sample_data.csv";
const DEFAULT_USERS_XML: &str = "runtime/data/users.xml";
const DEFAULT_PAGES_DIR: &str = "runtime/pages";
const DEFAULT_CACHE_STALENESS_MS: u64 = 600;

/// Where the data lives and how long parsed results stay fresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Attendance log (CSV).
    pub data_csv: PathBuf,

    /// User directory (XML).
    pub users_xml: PathBuf,

    /// Directory holding the static report pages.
    pub pages_dir: PathBuf,

    /// Age at which cached loads are recomputed.
    pub cache_staleness: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            data_csv: PathBuf::from(DEFAULT_DATA_CSV),
            users_xml: PathBuf::from(DEFAULT_USERS_XML),
            pages_dir: PathBuf::from(DEFAULT_PAGES_DIR),
            cache_staleness: Duration::from_millis(DEFAULT_CACHE_STALENESS_MS),
        }
    }
}

impl ApiConfig {
    /// Create ApiConfig from environment variables.
    ///
    /// Environment variables:
    /// - `PRESENCE_DATA_CSV`: attendance log path (default: runtime/data/sample_data.csv)
    /// - `PRESENCE_USERS_XML`: user directory path (default: runtime/data/users.xml)
    /// - `PRESENCE_PAGES_DIR`: report pages directory (default: runtime/pages)
    /// - `PRESENCE_CACHE_STALENESS_MS`: staleness window in milliseconds (default: 600)
    pub fn from_env() -> Self {
        let data_csv = std::env::var("PRESENCE_DATA_CSV")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_CSV));

        let users_xml = std::env::var("PRESENCE_USERS_XML")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_USERS_XML));

        let pages_dir = std::env::var("PRESENCE_PAGES_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_PAGES_DIR));

        let cache_staleness_ms = std::env::var("PRESENCE_CACHE_STALENESS_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_CACHE_STALENESS_MS);

        Self {
            data_csv,
            users_xml,
            pages_dir,
            cache_staleness: Duration::from_millis(cache_staleness_ms),
        }
    }

    /// Configuration rooted at a directory containing `sample_data.csv`,
    /// `users.xml` and `pages/`.
    pub fn rooted_at(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            data_csv: root.join("sample_data.csv"),
            users_xml: root.join("users.xml"),
            pages_dir: root.join("pages"),
            ..Self::default()
        }
    }

    pub fn with_cache_staleness(mut self, staleness: Duration) -> Self {
        self.cache_staleness = staleness;
        self
    }

    /// Cache settings derived from this configuration.
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig::new().with_staleness(self.cache_staleness)
    }
}
