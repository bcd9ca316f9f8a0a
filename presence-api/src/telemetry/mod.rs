//! Presence Telemetry - Logging Infrastructure
//!
//! Structured `tracing` output with an `EnvFilter`. Request logging is done
//! by the `tower-http` trace layer installed on the router.

pub mod tracer;

pub use tracer::{init_tracer, LogFormat, TelemetryConfig};
