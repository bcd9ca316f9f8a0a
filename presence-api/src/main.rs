//! Presence API Server Entry Point
//!
//! Bootstraps configuration and tracing, then starts the Axum HTTP server.

use std::net::SocketAddr;

use presence_api::telemetry::{init_tracer, TelemetryConfig};
use presence_api::{create_api_router, ApiConfig, ApiError, ApiResult, AppState};

#[tokio::main]
async fn main() -> ApiResult<()> {
    let telemetry_config = TelemetryConfig::default();
    init_tracer(&telemetry_config)?;

    let config = ApiConfig::from_env();
    tracing::info!(
        data_csv = %config.data_csv.display(),
        users_xml = %config.users_xml.display(),
        pages_dir = %config.pages_dir.display(),
        cache_staleness_ms = config.cache_staleness.as_millis() as u64,
        "Loaded configuration"
    );

    let app = create_api_router(AppState::new(config));

    let addr = resolve_bind_addr()?;
    tracing::info!(%addr, "Starting presence analyzer server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}: {}", addr, e)))?;

    let server = axum::serve(listener, app);
    tokio::select! {
        result = server => {
            result.map_err(|e| ApiError::internal_error(format!("Server error: {}", e)))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}

fn resolve_bind_addr() -> ApiResult<SocketAddr> {
    let host = std::env::var("PRESENCE_API_BIND").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port_str = std::env::var("PORT")
        .ok()
        .or_else(|| std::env::var("PRESENCE_API_PORT").ok())
        .unwrap_or_else(|| "5000".to_string());
    let port = port_str
        .parse::<u16>()
        .map_err(|_| ApiError::invalid_input(format!("Invalid port value: {}", port_str)))?;

    let addr = format!("{}:{}", host, port);
    addr.parse::<SocketAddr>()
        .map_err(|e| ApiError::invalid_input(format!("Invalid bind address {}: {}", addr, e)))
}
