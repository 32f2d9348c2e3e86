//! Error envelope and status mapping for HTTP responses.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{ErrorKind, StoreError};
use crate::metrics;

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable message.
    #[schema(example = "application 7 not found")]
    pub error: String,
    /// Machine-readable classification.
    pub kind: ErrorKind,
}

impl ErrorKind {
    /// HTTP status for this kind of error.
    pub fn status_code(self) -> StatusCode {
        match self {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::InvalidRequest => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<&StoreError> for ErrorBody {
    fn from(err: &StoreError) -> Self {
        Self {
            error: err.to_string(),
            kind: err.kind(),
        }
    }
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        metrics::inc_requests_rejected(kind);
        (kind.status_code(), Json(ErrorBody::from(&self))).into_response()
    }
}

impl From<JsonRejection> for StoreError {
    fn from(rejection: JsonRejection) -> Self {
        StoreError::InvalidBody(rejection.body_text())
    }
}

impl From<PathRejection> for StoreError {
    fn from(rejection: PathRejection) -> Self {
        StoreError::InvalidBody(rejection.body_text())
    }
}
