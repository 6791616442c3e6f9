//! Infrastructure layer - Adapters for external systems
//!
//! Implements the application ports on top of the translation and speech
//! provider crates, and owns configuration loading and logging setup.

pub mod adapters;
pub mod bootstrap;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use bootstrap::{BootstrapError, Interpreter, assemble, build_interpreter};
pub use config::{
    AppConfig, Environment, GatewayConfig, LanguageEntry, LanguagesConfig, ServerConfig,
    SessionsConfig,
};
pub use telemetry::{LogFormat, TelemetryConfig, TelemetryError, init_logging};
