//! Shared helpers for the router integration tests.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use presence_api::{create_api_router, ApiConfig, AppState};
use presence_test_utils::fixtures::Fixture;
use presence_test_utils::ManualClock;
use tower::ServiceExt; // for `oneshot`

/// Router over the sample fixture, with a manual clock starting at 0.
pub fn sample_app() -> (Fixture, Arc<ManualClock>, Router) {
    let fixture = Fixture::sample().expect("fixture should be written");
    let clock = Arc::new(ManualClock::new(0));
    let state = AppState::with_clock(ApiConfig::rooted_at(fixture.root()), clock.clone());
    (fixture, clock, create_api_router(state))
}

pub async fn send(app: &Router, uri: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");
    app.clone()
        .oneshot(request)
        .await
        .expect("router is infallible")
}

/// GET `uri` and decode the JSON body.
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = send(app, uri).await;
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    let json = serde_json::from_slice(&body).expect("body should be JSON");
    (status, json)
}

/// Numbers of a JSON row after its leading label.
pub fn row_numbers(row: &serde_json::Value) -> Vec<f64> {
    row.as_array()
        .expect("row should be an array")
        .iter()
        .skip(1)
        .map(|v| v.as_f64().expect("row value should be a number"))
        .collect()
}
