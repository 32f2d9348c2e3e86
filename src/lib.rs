//! In-memory Application resource REST API.
//!
//! Exposes CRUD operations on Application records (`id`, `name`, `password`)
//! under a versioned base path, together with an OpenAPI description and a
//! Swagger UI.
//!
//! ```text
//! GET     /ums/v1/applications        list, with a static pagination block
//! POST    /ums/v1/applications        create; id is assigned by the server
//! OPTIONS /ums/v1/applications        allowed methods
//! GET     /ums/v1/applications/{id}   fetch one
//! PUT     /ums/v1/applications/{id}   partial update
//! DELETE  /ums/v1/applications/{id}   remove; ids are never reused
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`store`]: Application records and the in-memory store
//! - [`api`]: HTTP routes, handlers and OpenAPI document
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod store;
pub mod utils;

pub use config::Config;
pub use error::{Result, ServiceError, StoreError};
