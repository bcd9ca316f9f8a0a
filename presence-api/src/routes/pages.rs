//! Static report pages.
//!
//! The pages are plain HTML files that fetch the JSON reports from
//! `/api/v1`. Only the known report pages are served.

use std::io::ErrorKind;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Page served for `/`.
pub const DEFAULT_PAGE: &str = "presence_weekday.html";

/// Report pages that may be requested by name.
pub const REPORT_PAGES: [&str; 4] = [
    "presence_weekday.html",
    "mean_time_weekday.html",
    "presence_start_end.html",
    "weekly_mean_presence.html",
];

const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// GET / - Redirect to the default report page
pub async fn index() -> impl IntoResponse {
    (
        StatusCode::FOUND,
        [(header::LOCATION, format!("/{}", DEFAULT_PAGE))],
    )
}

/// GET /:page - Serve a known report page
pub async fn page(
    State(config): State<Arc<ApiConfig>>,
    Path(page): Path<String>,
) -> ApiResult<impl IntoResponse> {
    if !is_report_page(&page) {
        tracing::debug!(page, "Unknown page requested");
        return Err(ApiError::page_not_found(&page));
    }

    let path = config.pages_dir.join(&page);
    match tokio::fs::read_to_string(&path).await {
        Ok(body) => Ok(([(header::CONTENT_TYPE, HTML_CONTENT_TYPE)], body)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "Report page missing on disk");
            Err(ApiError::page_not_found(&page))
        }
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Failed to read report page");
            Err(ApiError::internal_error("Failed to read report page"))
        }
    }
}

/// Only bare names from the known page list qualify.
fn is_report_page(name: &str) -> bool {
    !name.contains(['/', '\\']) && !name.contains("..") && REPORT_PAGES.contains(&name)
}

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/:page", get(page))
}
