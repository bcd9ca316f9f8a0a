//! OpenAPI document for the Presence API
//!
//! Generated by utoipa from the route annotations and schema derives.

use utoipa::OpenApi;

use crate::error::{ApiError, ErrorCode};
use crate::routes::health::{CacheSummary, HealthStatus, Liveness, Readiness, SourceHealth};
use crate::routes::{health, presence};
use presence_core::UserSummary;

/// OpenAPI document for the Presence API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Presence Analyzer API",
        version = "0.1.0",
        description = "Workplace presence statistics grouped by weekday",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:5000", description = "Local Development")
    ),
    tags(
        (name = "Presence", description = "Users listing and per-user presence reports"),
        (name = "Health", description = "Liveness and readiness checks")
    ),
    paths(
        // === Presence Routes ===
        presence::list_users,
        presence::mean_time_weekday,
        presence::presence_weekday,
        presence::presence_start_end,
        presence::weekly_mean_presence_report,

        // === Health Routes ===
        health::ping,
        health::liveness,
        health::readiness,
    ),
    components(
        schemas(
            // === Error Types ===
            ApiError, ErrorCode,

            // === Presence Types ===
            UserSummary,

            // === Health Types ===
            HealthStatus, Liveness, Readiness, SourceHealth, CacheSummary
        )
    )
)]
pub struct ApiDoc;
