// Common DTOs for public API
//
// These types are shared across multiple API endpoints.

use axum::http::{StatusCode, Uri};
use axum::Json;
use flowstate_core::{ErrorKind, WorkflowError};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standard error response for API endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message describing what went wrong.
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    /// Convert to axum response tuple
    pub fn into_response(self, status: StatusCode) -> (StatusCode, Json<Self>) {
        (status, Json(self))
    }
}

/// Response wrapper for list endpoints.
/// All list endpoints return responses wrapped in a `data` field.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListResponse<T> {
    /// Array of items returned by the list operation.
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }
}

impl<T> From<Vec<T>> for ListResponse<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Build a `Location` value for `path` that keeps any prefix the router is nested under.
///
/// `original` is the request URI as received, `uri` the one seen by the nested router.
pub fn location(original: &Uri, uri: &Uri, path: &str) -> String {
    let prefix = original.path().strip_suffix(uri.path()).unwrap_or("");
    format!("{}{}", prefix, path)
}

/// HTTP status for a workflow error.
///
/// A dangling reference (instance whose definition or state is gone) is
/// reported as a missing resource; any other internal error is a 500.
pub fn status_for(err: &WorkflowError) -> StatusCode {
    match err.kind() {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorKind::Internal if err.is_dangling_reference() => StatusCode::NOT_FOUND,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Map a workflow error to an API error response, logging it on the way
pub fn error_response(err: WorkflowError) -> ApiError {
    let status = status_for(&err);
    if err.kind() == ErrorKind::Internal {
        tracing::error!(status = status.as_u16(), "{}", err);
    } else {
        tracing::warn!(status = status.as_u16(), "{}", err);
    }
    ErrorResponse::new(err.to_string()).into_response(status)
}
