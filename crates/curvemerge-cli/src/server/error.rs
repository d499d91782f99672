//! API error types and handling.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use curvemerge::CurveMergeError;
use serde::Serialize;

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// Request body is not a usable merge request.
    InvalidInput(String),
    /// Internal server error.
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, "invalid_input", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal", msg),
        };

        if status.is_server_error() {
            tracing::error!(%message, "request failed");
        } else {
            tracing::debug!(%message, "rejected request");
        }

        (
            status,
            Json(ErrorResponse {
                error: error.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

impl From<CurveMergeError> for ApiError {
    fn from(err: CurveMergeError) -> Self {
        match err {
            CurveMergeError::InvalidInputShape(_)
            | CurveMergeError::Json(_)
            | CurveMergeError::NoJsonContent(_) => ApiError::InvalidInput(err.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_errors_are_invalid_input() {
        let err = ApiError::from(CurveMergeError::InvalidInputShape("missing 'childLogs'".into()));
        assert!(matches!(err, ApiError::InvalidInput(ref m) if m.contains("childLogs")));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_other_errors_are_internal() {
        let err = ApiError::from(CurveMergeError::Persistence("disk full".into()));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
