//! OpenAPI description of the applications API.

use utoipa::openapi::server::Server;
use utoipa::OpenApi;

use crate::error::ErrorKind;
use crate::store::{Application, ApplicationPatch, Deleted, NewApplication};

use super::error::ErrorBody;
use super::handlers::{self, AllowResponse, ApplicationList, Link, PaginationInfo};

/// OpenAPI documentation for the applications API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "UMS Applications API",
        version = "0.9",
        description = "CRUD operations on Application resources"
    ),
    paths(
        handlers::list_applications,
        handlers::create_application,
        handlers::application_options,
        handlers::get_application,
        handlers::update_application,
        handlers::delete_application,
    ),
    components(schemas(
        Application,
        NewApplication,
        ApplicationPatch,
        Deleted,
        ApplicationList,
        PaginationInfo,
        Link,
        AllowResponse,
        ErrorBody,
        ErrorKind,
    )),
    tags(
        (name = "applications", description = "Application management endpoints")
    )
)]
pub struct ApiDoc;

/// Build the document with `base_path` as its only server.
pub fn openapi(base_path: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.servers = Some(vec![Server::new(base_path)]);
    doc
}

/// Pretty-printed JSON of the document.
pub fn openapi_json(base_path: &str) -> Result<String, serde_json::Error> {
    openapi(base_path).to_pretty_json()
}
