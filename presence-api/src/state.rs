//! Shared application state for Axum routers.

use std::sync::Arc;

use presence_core::{codepoint_order, NameComparator, PresenceTable, UserDirectory};
use presence_storage::{
    load_presence, load_user_directory, CacheKey, CacheRead, Clock, ResultCache, SystemClock,
};

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};

/// Result cache used by the API, driven by an injected clock.
pub type ApiCache = ResultCache<Arc<dyn Clock>>;

/// Application-wide state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ApiConfig>,
    /// Memoized attendance table and user directory.
    pub cache: Arc<ApiCache>,
    /// Ordering applied to user names in the users listing.
    pub compare_names: NameComparator,
    pub start_time: std::time::Instant,
}

crate::impl_from_ref!(Arc<ApiConfig>, config);
crate::impl_from_ref!(Arc<ApiCache>, cache);
crate::impl_from_ref!(std::time::Instant, start_time);

impl AppState {
    pub fn new(config: ApiConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: ApiConfig, clock: Arc<dyn Clock>) -> Self {
        let cache = ResultCache::with_clock(config.cache_config(), clock);
        Self {
            config: Arc::new(config),
            cache: Arc::new(cache),
            compare_names: codepoint_order,
            start_time: std::time::Instant::now(),
        }
    }

    /// Replace the user name ordering.
    pub fn with_name_order(mut self, compare: NameComparator) -> Self {
        self.compare_names = compare;
        self
    }

    /// The attendance table, reloaded from disk once the cached copy is stale.
    pub async fn presence_data(&self) -> ApiResult<CacheRead<Arc<PresenceTable>>> {
        let path = self.config.data_csv.clone();
        self.cache
            .get_or_load(CacheKey::PresenceData, move || async move {
                let table = tokio::task::spawn_blocking(move || load_presence(path)).await??;
                Ok::<_, ApiError>(table)
            })
            .await
    }

    /// The user directory, reloaded from disk once the cached copy is stale.
    pub async fn user_directory(&self) -> ApiResult<CacheRead<Arc<UserDirectory>>> {
        let path = self.config.users_xml.clone();
        self.cache
            .get_or_load(CacheKey::UserDirectory, move || async move {
                let directory =
                    tokio::task::spawn_blocking(move || load_user_directory(path)).await??;
                Ok::<_, ApiError>(directory)
            })
            .await
    }
}
