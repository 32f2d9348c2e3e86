//! HTTP API route definitions.

use axum::http::{header, Method};
use axum::routing::{get, MethodRouter};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;

use super::docs;
use super::handlers::{
    application_options, create_application, delete_application, get_application, health,
    list_applications, render_metrics, update_application, AppState,
};

/// Permissive CORS for the resource routes.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::PUT, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}

/// Routes for the applications resource, relative to the base path.
pub fn application_routes() -> Router<AppState> {
    // The CORS layer answers every OPTIONS itself, so the collection's
    // capability handler is registered after it.
    let collection: MethodRouter<AppState> = get(list_applications)
        .post(create_application)
        .layer(cors_layer());
    let collection = collection.options(application_options);

    let item: MethodRouter<AppState> = get(get_application)
        .put(update_application)
        .delete(delete_application)
        .layer(cors_layer());

    Router::new()
        .route("/applications", collection)
        .route("/applications/:id", item)
}

/// Create the API router.
pub fn create_router(state: AppState, config: &Config) -> Router {
    let openapi = docs::openapi(&config.api_base_path);

    Router::new()
        // Health endpoints
        .route("/health", get(health))
        .route("/metrics", get(render_metrics))
        // Resource endpoints
        .nest(&config.api_base_path, application_routes())
        .with_state(state)
        // Documentation
        .merge(SwaggerUi::new(config.api_spec_url.clone()).url(config.openapi_json_url(), openapi))
        .layer(TraceLayer::new_for_http())
}
