//! Presence API - HTTP Layer
//!
//! Axum server exposing the presence reports as JSON under `/api/v1`, the
//! static report pages, health checks and an OpenAPI document. Parsed data
//! is memoized in a [`presence_storage::ResultCache`] held by [`AppState`].

pub mod config;
pub mod error;
pub mod macros;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod telemetry;

// Re-export commonly used types
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult, ErrorCode};
pub use openapi::ApiDoc;
pub use routes::create_api_router;
pub use state::{ApiCache, AppState};
