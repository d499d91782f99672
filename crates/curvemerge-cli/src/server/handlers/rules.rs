//! Configuration and health handlers.

use axum::{Json, extract::State};
use serde::Serialize;

use curvemerge::MergeConfig;

use crate::server::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /api/rules - The active rules and depth markers.
pub async fn get_rules(State(state): State<AppState>) -> Json<MergeConfig> {
    Json(state.merger.config().clone())
}

/// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
