//! Application state shared across handlers

use std::sync::Arc;

use application::InterpretationService;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Orchestrator, also giving access to the gateways and catalog
    pub service: Arc<InterpretationService>,
}

impl AppState {
    /// Create state around a wired service
    pub const fn new(service: Arc<InterpretationService>) -> Self {
        Self { service }
    }
}
