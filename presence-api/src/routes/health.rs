//! Health checks.
//!
//! `/health/ping` and `/health/live` never touch the data files.
//! `/health/ready` goes through the result cache exactly like the report
//! endpoints, so it fails when a report request would fail.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use presence_core::TimestampMs;
use presence_storage::{CacheRead, CacheStats};
use serde::Serialize;

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Body of `/health/live`.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Liveness {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
}

/// Body of `/health/ready`.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Readiness {
    /// Healthy only when both sources loaded.
    pub status: HealthStatus,
    pub presence_data: SourceHealth,
    pub user_directory: SourceHealth,
    pub cache: CacheSummary,
}

/// State of one cached data file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SourceHealth {
    pub status: HealthStatus,
    /// Users in the attendance log or in the directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<usize>,
    /// When the served copy was loaded, in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<i64>))]
    pub cached_at: Option<TimestampMs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SourceHealth {
    fn from_read<T>(read: ApiResult<CacheRead<Arc<T>>>, users: impl FnOnce(&T) -> usize) -> Self {
        match read {
            Ok(read) => Self {
                status: HealthStatus::Healthy,
                users: Some(users(read.value())),
                cached_at: Some(read.cached_at()),
                error: None,
            },
            Err(e) => Self {
                status: HealthStatus::Unhealthy,
                users: None,
                cached_at: None,
                error: Some(e.message),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CacheSummary {
    pub hits: u64,
    pub misses: u64,
    pub entries: u64,
    pub hit_rate: f64,
}

impl From<CacheStats> for CacheSummary {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            entries: stats.entry_count,
        }
    }
}

/// GET /health/ping
#[utoipa::path(
    get,
    path = "/health/ping",
    tag = "Health",
    responses((status = 200, description = "Service is responding", body = String)),
)]
pub async fn ping() -> &'static str {
    "pong"
}

/// GET /health/live
#[utoipa::path(
    get,
    path = "/health/live",
    tag = "Health",
    responses((status = 200, description = "Process is alive", body = Liveness)),
)]
pub async fn liveness(State(state): State<AppState>) -> Json<Liveness> {
    Json(Liveness {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}

/// GET /health/ready
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "Health",
    responses(
        (status = 200, description = "Both data files load", body = Readiness),
        (status = 503, description = "A data file fails to load", body = Readiness),
    ),
)]
pub async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<Readiness>) {
    let presence_data = SourceHealth::from_read(state.presence_data().await, |table| table.len());
    let user_directory =
        SourceHealth::from_read(state.user_directory().await, |directory| directory.len());
    let report = Readiness {
        status: overall_status(&[&presence_data, &user_directory]),
        presence_data,
        user_directory,
        cache: state.cache.stats().await.into(),
    };

    let status_code = match report.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };
    (status_code, Json(report))
}

fn overall_status(sources: &[&SourceHealth]) -> HealthStatus {
    if sources.iter().all(|s| s.status == HealthStatus::Healthy) {
        HealthStatus::Healthy
    } else {
        HealthStatus::Unhealthy
    }
}

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/ping", get(ping))
        .route("/live", get(liveness))
        .route("/ready", get(readiness))
}

#[cfg(test)]
mod tests {
    use super::*;

    use presence_core::{DataSourceError, PresenceTable};

    #[test]
    fn test_source_health_from_loaded_read() {
        let read = Ok(CacheRead::from_cache(Arc::new(PresenceTable::new()), 1_200));
        let health = SourceHealth::from_read(read, |table| table.len());

        assert_eq!(health.status, HealthStatus::Healthy);
        assert_eq!(health.users, Some(0));
        assert_eq!(health.cached_at, Some(1_200));

        let json = serde_json::to_value(&health).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "healthy", "users": 0, "cached_at": 1200})
        );
    }

    #[test]
    fn test_source_health_from_failed_read() {
        let read: ApiResult<CacheRead<Arc<PresenceTable>>> =
            Err(DataSourceError::new("/data.csv", "No such file").into());
        let health = SourceHealth::from_read(read, |table| table.len());

        assert_eq!(health.status, HealthStatus::Unhealthy);
        assert_eq!(health.users, None);
        assert_eq!(health.cached_at, None);
        assert_eq!(health.error.as_deref(), Some("Data source unavailable"));
    }

    #[test]
    fn test_overall_status_requires_every_source() {
        let healthy = SourceHealth {
            status: HealthStatus::Healthy,
            users: Some(2),
            cached_at: Some(0),
            error: None,
        };
        let failed = SourceHealth {
            status: HealthStatus::Unhealthy,
            users: None,
            cached_at: None,
            error: Some("Data source unavailable".to_string()),
        };

        assert_eq!(overall_status(&[&healthy, &healthy]), HealthStatus::Healthy);
        assert_eq!(overall_status(&[&healthy, &failed]), HealthStatus::Unhealthy);
    }

    #[test]
    fn test_cache_summary_from_stats() {
        let summary = CacheSummary::from(CacheStats {
            hits: 3,
            misses: 1,
            entry_count: 2,
        });
        assert_eq!(summary.entries, 2);
        assert!((summary.hit_rate - 0.75).abs() < f64::EPSILON);
    }
}
