//! Shared application state.

use std::sync::Arc;

use fxstrength_engine::StrengthEngine;

/// State handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    /// Snapshot engine shared across requests.
    pub engine: Arc<StrengthEngine>,
}

impl AppState {
    /// Create state around an engine.
    pub fn new(engine: Arc<StrengthEngine>) -> Self {
        Self { engine }
    }
}
