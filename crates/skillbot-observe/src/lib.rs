//! Observability setup for skillbot: structured logging via `tracing` and
//! optional OpenTelemetry span export.

pub mod tracing_setup;

pub use tracing_setup::{init_tracing, shutdown_tracing};
