//! Application state for the scan API

use std::sync::Arc;

use scan_core::ScanBackend;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Scanner every upload is forwarded to
    backend: Arc<dyn ScanBackend>,
}

impl AppState {
    /// Create a new AppState around the given backend
    pub fn new(backend: Arc<dyn ScanBackend>) -> Self {
        Self { backend }
    }

    /// Get the scan backend
    pub fn backend(&self) -> &Arc<dyn ScanBackend> {
        &self.backend
    }
}
