//! Application state for the web layer.

use std::sync::Arc;

use crate::tools::FlightTools;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The flight tool facade
    pub tools: Arc<FlightTools>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(tools: FlightTools) -> Self {
        Self {
            tools: Arc::new(tools),
        }
    }
}
