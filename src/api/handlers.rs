//! HTTP API handlers.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::error::StoreError;
use crate::metrics::LatencyTimer;
use crate::store::{Application, ApplicationPatch, ApplicationStore, Deleted, NewApplication};

use super::error::ErrorBody;

/// Methods advertised for the applications collection.
pub const ALLOWED_METHODS: &str = "GET,PUT,POST,DELETE";

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// The application store.
    pub store: Arc<ApplicationStore>,
    /// Prometheus handle, when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state around a store.
    pub fn new(store: ApplicationStore) -> Self {
        Self {
            store: Arc::new(store),
            metrics: None,
        }
    }

    /// Attach a Prometheus handle for the `/metrics` endpoint.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ApplicationStore::new())
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Navigation link inside pagination info.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Link {
    /// Target URL.
    pub href: String,
    /// Media type of the target.
    #[serde(rename = "type")]
    pub media_type: String,
    /// HTTP method to use.
    pub method: String,
    /// Link relation.
    pub rel: String,
    /// Human-readable title.
    pub title: String,
}

/// Pagination block of a list response.
///
/// Results are never paged: the block always describes a single page that
/// holds every application.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaginationInfo {
    /// Link to the next page; always null.
    pub next_results: Option<Link>,
    /// Link to the previous page; always null.
    pub previous_results: Option<Link>,
    /// Number of applications in this page.
    pub count: usize,
    /// Total number of applications.
    pub number_of_results: usize,
    /// Offset of this page.
    pub offset: usize,
}

impl PaginationInfo {
    /// Single page holding `count` results.
    pub fn single_page(count: usize) -> Self {
        Self {
            next_results: None,
            previous_results: None,
            count,
            number_of_results: count,
            offset: 0,
        }
    }
}

/// A list of applications.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApplicationList {
    /// Applications ordered by id.
    pub applications: Vec<Application>,
    /// Pagination metadata.
    pub pagination: PaginationInfo,
}

/// Body of the OPTIONS capability response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AllowResponse {
    /// Comma separated allowed methods.
    #[serde(rename = "Allow")]
    #[schema(example = "GET,PUT,POST,DELETE")]
    pub allow: String,
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Prometheus exposition, or 404 when no recorder is installed.
pub async fn render_metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Get a list of Applications
#[utoipa::path(
    get,
    path = "/applications",
    tag = "applications",
    operation_id = "getApplicationList",
    responses(
        (status = 200, description = "All applications", body = ApplicationList)
    )
)]
pub async fn list_applications(State(state): State<AppState>) -> Json<ApplicationList> {
    let _timer = LatencyTimer::new("list_applications");

    let applications = state.store.list().await;
    let pagination = PaginationInfo::single_page(applications.len());

    Json(ApplicationList {
        applications,
        pagination,
    })
}

/// Create a new application
///
/// Create a new Application resource by POSTing Application JSON. The `id`
/// field MUST NOT be included; it is assigned by the server.
#[utoipa::path(
    post,
    path = "/applications",
    tag = "applications",
    operation_id = "create",
    request_body = NewApplication,
    responses(
        (status = 200, description = "Application created", body = Application),
        (status = 400, description = "Missing or malformed body", body = ErrorBody)
    )
)]
pub async fn create_application(
    State(state): State<AppState>,
    payload: Result<Json<NewApplication>, JsonRejection>,
) -> Result<Json<Application>, StoreError> {
    let _timer = LatencyTimer::new("create_application");

    let Json(input) = payload?;
    debug!("Create requested for {:?}", input.name);

    let application = state.store.create(input).await?;
    Ok(Json(application))
}

/// Get a single Application by ID
#[utoipa::path(
    get,
    path = "/applications/{id}",
    tag = "applications",
    operation_id = "get",
    params(
        ("id" = u64, Path, description = "Application ID")
    ),
    responses(
        (status = 200, description = "Application found", body = Application),
        (status = 400, description = "Malformed ID", body = ErrorBody),
        (status = 404, description = "Application Not Found", body = ErrorBody)
    )
)]
pub async fn get_application(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<Application>, StoreError> {
    let _timer = LatencyTimer::new("get_application");

    let Path(id) = id?;
    let application = state.store.get(id).await?;
    Ok(Json(application))
}

/// Modify an existing Application
///
/// Only the fields present are changed. An empty `password` is replaced by a
/// generated one. An `id` in the body must match the path.
#[utoipa::path(
    put,
    path = "/applications/{id}",
    tag = "applications",
    operation_id = "modifyApplication",
    params(
        ("id" = u64, Path, description = "Application ID")
    ),
    request_body = ApplicationPatch,
    responses(
        (status = 200, description = "Application updated", body = Application),
        (status = 400, description = "Empty body or ID mismatch", body = ErrorBody),
        (status = 404, description = "Application Not Found", body = ErrorBody)
    )
)]
pub async fn update_application(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
    payload: Result<Json<ApplicationPatch>, JsonRejection>,
) -> Result<Json<Application>, StoreError> {
    let _timer = LatencyTimer::new("update_application");

    let Path(id) = id?;
    let Json(patch) = payload?;

    let application = state.store.update(id, patch).await?;
    Ok(Json(application))
}

/// Delete an Application by ID
#[utoipa::path(
    delete,
    path = "/applications/{id}",
    tag = "applications",
    operation_id = "deleteApplication",
    params(
        ("id" = u64, Path, description = "Application ID")
    ),
    responses(
        (status = 200, description = "Application deleted", body = Deleted),
        (status = 400, description = "Malformed ID", body = ErrorBody),
        (status = 404, description = "Application Not Found", body = ErrorBody)
    )
)]
pub async fn delete_application(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<Deleted>, StoreError> {
    let _timer = LatencyTimer::new("delete_application");

    let Path(id) = id?;
    let deleted = state.store.delete(id).await?;
    Ok(Json(deleted))
}

/// Allowed methods for the applications collection
#[utoipa::path(
    options,
    path = "/applications",
    tag = "applications",
    operation_id = "applicationOptions",
    responses(
        (status = 200, description = "Allowed methods", body = AllowResponse)
    )
)]
pub async fn application_options() -> impl IntoResponse {
    (
        [
            (header::ALLOW, ALLOWED_METHODS),
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
        ],
        Json(AllowResponse {
            allow: ALLOWED_METHODS.to_string(),
        }),
    )
}
