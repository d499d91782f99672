//! Application state for the web server.

use std::sync::Arc;

use curvemerge::CurveMerger;

/// Shared application state.
///
/// The merger holds only configuration, so requests share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub merger: Arc<CurveMerger>,
}

impl AppState {
    pub fn new(merger: CurveMerger) -> Self {
        Self {
            merger: Arc::new(merger),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(CurveMerger::new())
    }
}
