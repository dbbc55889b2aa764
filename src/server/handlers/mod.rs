// src/server/handlers/mod.rs
//! HTTP request handlers for the Potluck server

pub mod api;
pub mod pages;

use crate::store::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

/// Error response in RFC 7807 problem format
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    /// Error type URI
    #[serde(rename = "type")]
    pub error_type: String,
    /// Human-readable title
    pub title: String,
    /// HTTP status code
    pub status: u16,
    /// Detailed description
    pub detail: String,
}

impl ApiError {
    pub fn new(error_type: &str, title: &str, status: StatusCode, detail: &str) -> Self {
        Self {
            error_type: format!("urn:potluck:error:{}", error_type),
            title: title.to_string(),
            status: status.as_u16(),
            detail: detail.to_string(),
        }
    }

    /// Not found error
    pub fn not_found(resource: &str) -> Self {
        Self::new(
            "not_found",
            "Not Found",
            StatusCode::NOT_FOUND,
            &format!("{} not found", resource),
        )
    }

    /// Bad request error
    pub fn bad_request(detail: &str) -> Self {
        Self::new("bad_request", "Bad Request", StatusCode::BAD_REQUEST, detail)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        log_store_error(&err);
        Self::new(
            err.kind(),
            "Internal Error",
            StatusCode::INTERNAL_SERVER_ERROR,
            "The recipe collection is unavailable",
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (
            status,
            [("content-type", "application/problem+json")],
            Json(self),
        )
            .into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Storage failures are server errors; the cause stays in the log only
fn log_store_error(err: &StoreError) {
    tracing::error!(kind = err.kind(), "Recipe store failure: {}", err);
}
