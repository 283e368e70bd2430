//! API error taxonomy and response shaping.
//!
//! Every handler fault funnels through `ApiError`, so all error payloads
//! share one JSON shape. Store faults are logged here and reduced to a
//! generic message; raw details are only attached in debug builds.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid filter parameters: {}", invalid.join(", "))]
    UnknownFilters { invalid: Vec<String> },

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "Bad Request",
                    "message": message,
                })),
            )
                .into_response(),
            ApiError::UnknownFilters { invalid } => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "Bad Request",
                    "message": format!("Invalid filter parameters: {}", invalid.join(", ")),
                    "allowedFilters": crate::query::ALLOWED_QUERY_PARAMS,
                })),
            )
                .into_response(),
            ApiError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "Not Found",
                    "message": message,
                })),
            )
                .into_response(),
            ApiError::Internal(err) => {
                error!("Data access error: {:#}", err);
                let mut body = json!({
                    "error": "Database Error",
                    "message": "An error occurred while accessing the database",
                });
                if cfg!(debug_assertions) {
                    body["details"] = json!(format!("{:#}", err));
                }
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_request_maps_to_400() {
        let response = ApiError::BadRequest("Limit must be a positive integer".into())
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let response = ApiError::NotFound("nope".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn internal_maps_to_500() {
        let response = ApiError::Internal(anyhow::anyhow!("boom")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
