//! Unified error types for the applications service.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;
use utoipa::ToSchema;

/// Unified error type for the service binary.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Application store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// JSON serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors produced by application store operations and request decoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No application with this id.
    #[error("application {id} not found")]
    NotFound {
        /// The requested id.
        id: u64,
    },

    /// Update payload carried none of the known fields.
    #[error("empty body")]
    EmptyBody,

    /// Update payload names a different application than the path.
    #[error("id mismatch: path id {path}, body id {body}")]
    IdMismatch {
        /// Id from the request path.
        path: u64,
        /// Id carried in the payload.
        body: u64,
    },

    /// Create payload tried to choose its own id.
    #[error("id must not be supplied, it is assigned by the server")]
    IdSupplied,

    /// Create payload without a name.
    #[error("name is required")]
    MissingName,

    /// Request body or path could not be decoded.
    #[error("invalid request: {0}")]
    InvalidBody(String),
}

/// Error classification exposed to clients.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Unknown application id.
    NotFound,
    /// Missing or malformed input.
    InvalidRequest,
}

impl StoreError {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::NotFound { .. } => ErrorKind::NotFound,
            StoreError::EmptyBody
            | StoreError::IdMismatch { .. }
            | StoreError::IdSupplied
            | StoreError::MissingName
            | StoreError::InvalidBody(_) => ErrorKind::InvalidRequest,
        }
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
