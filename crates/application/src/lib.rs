//! Application layer - Use cases and orchestration
//!
//! Contains the command router, the translation and speech gateways, the
//! session store, and the interpretation orchestrator, plus the port
//! definitions that infrastructure adapters implement.

pub mod command_router;
pub mod error;
pub mod ports;
pub mod services;

pub use command_router::CommandRouter;
pub use error::{ApplicationError, Capability, GatewayFailure};
pub use ports::*;
pub use services::*;
