//! HTTP Routes Module
//!
//! Includes:
//! - Presence reports under `/api/v1`
//! - Static report pages at the root
//! - Health check endpoints
//! - The OpenAPI document

pub mod health;
pub mod pages;
pub mod presence;

use axum::{response::IntoResponse, routing::get, Json, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::openapi::ApiDoc;
use crate::state::AppState;

async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// Build the complete application router.
pub fn create_api_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", presence::create_router())
        .nest("/health", health::create_router())
        .route("/openapi.json", get(openapi_json))
        .merge(pages::create_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
