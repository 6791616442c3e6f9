//! Logging initialization
//!
//! Installs a `tracing` subscriber with an env filter and either a
//! human-readable or a JSON formatter.

mod logging;

pub use logging::{LogFormat, TelemetryConfig, TelemetryError, init_logging};
