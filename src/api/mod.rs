//! HTTP API: application resource routes, documentation, health and metrics.

pub mod docs;
pub mod error;
pub mod handlers;
pub mod routes;

pub use docs::ApiDoc;
pub use error::ErrorBody;
pub use handlers::AppState;
pub use routes::create_router;
