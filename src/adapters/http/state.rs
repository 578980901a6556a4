//! Application state for the HTTP server.

use crate::ports::CourseLookupPort;
use std::sync::Arc;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub lookup: Arc<dyn CourseLookupPort>,
}

impl AppState {
    pub fn new(lookup: Arc<dyn CourseLookupPort>) -> Self {
        Self { lookup }
    }
}
