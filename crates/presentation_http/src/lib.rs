//! Interpreter HTTP presentation layer
//!
//! Exposes the interpretation service over HTTP: inbound chat events, direct
//! translation and speech endpoints, and health/status probes.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod tasks;

pub use error::ApiError;
pub use middleware::{RequestIdLayer, ValidatedJson, ValidationError};
pub use routes::{create_app, create_router};
pub use state::AppState;
pub use tasks::spawn_session_cleanup_task;
