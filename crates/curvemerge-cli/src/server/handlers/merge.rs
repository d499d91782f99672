//! Merge and classification handlers.

use axum::{Json, body::Bytes, extract::State};
use serde_json::Value;

use curvemerge::{ClassificationReport, CurveMergeError, MergeReport, MergeRequest, MergedRecord};

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Parse a request body, reporting syntax and shape problems as invalid input.
fn parse_request(body: &[u8]) -> Result<MergeRequest, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::InvalidInput("request body is empty".to_string()));
    }
    let value: Value = serde_json::from_slice(body).map_err(CurveMergeError::from)?;
    Ok(MergeRequest::from_value(value)?)
}

/// POST /api/merge - Merge and return the output array only.
pub async fn merge_records(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Vec<MergedRecord>>, ApiError> {
    let request = parse_request(&body)?;
    let report = state.merger.merge_request(&request);
    Ok(Json(report.records))
}

/// POST /api/merge/report - Merge and return the full report.
pub async fn merge_report(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<MergeReport>, ApiError> {
    let request = parse_request(&body)?;
    Ok(Json(state.merger.merge_request(&request)))
}

/// POST /api/classify - Classify every child record without merging.
pub async fn classify(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ClassificationReport>, ApiError> {
    let request = parse_request(&body)?;
    Ok(Json(state.merger.classify_request(&request)))
}
