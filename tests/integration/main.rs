//! End-to-end tests for the applications API.
//!
//! Each test drives a fresh router in-process through `tower::ServiceExt`.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use ums_api::api::{create_router, AppState};
use ums_api::config::Config;
use ums_api::store::{Application, ApplicationStore};

/// Fresh router over an empty store with default configuration.
fn test_app() -> Router {
    create_router(AppState::new(ApplicationStore::new()), &Config::default())
}

/// Send one request and decode the JSON response.
async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create(app: &Router, body: Value) -> Application {
    let (status, value) = send(app, Method::POST, "/ums/v1/applications", Some(body)).await;
    assert_eq!(status, StatusCode::OK, "{value}");
    serde_json::from_value(value).unwrap()
}

#[tokio::test]
async fn create_assigns_id_and_generates_password() {
    let app = test_app();

    let created = create(&app, json!({"name": "x"})).await;

    assert_eq!(created.id, 1);
    assert_eq!(created.name, "x");
    assert_eq!(created.password.len(), 10);
    assert!(created.password.chars().all(|c| c.is_ascii_lowercase()));
}

#[tokio::test]
async fn sequential_creates_get_increasing_ids() {
    let app = test_app();

    let first = create(&app, json!({"name": "app1"})).await;
    let second = create(&app, json!({"name": "app2", "password": "passwd2"})).await;

    assert_eq!(second.id, first.id + 1);
    assert_eq!(second.password, "passwd2");
}

#[tokio::test]
async fn create_rejects_caller_supplied_id() {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/ums/v1/applications",
        Some(json!({"id": 5, "name": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "invalid_request");

    let (status, _) = send(
        &app,
        Method::POST,
        "/ums/v1/applications",
        Some(json!({"password": "only"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, list) = send(&app, Method::GET, "/ums/v1/applications", None).await;
    assert_eq!(list["pagination"]["count"], 0);
}

#[tokio::test]
async fn list_after_delete_is_sorted_without_gap_filling() {
    let app = test_app();
    for name in ["app1", "app2", "app3"] {
        create(&app, json!({"name": name})).await;
    }

    let (status, _) = send(&app, Method::DELETE, "/ums/v1/applications/2", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, list) = send(&app, Method::GET, "/ums/v1/applications", None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<u64> = list["applications"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 3]);
    assert_eq!(list["pagination"]["number_of_results"], 2);
    assert_eq!(list["pagination"]["next_results"], Value::Null);
}

#[tokio::test]
async fn deleted_id_is_gone_and_never_reassigned() {
    let app = test_app();
    create(&app, json!({"name": "a"})).await;
    create(&app, json!({"name": "b"})).await;

    send(&app, Method::DELETE, "/ums/v1/applications/2", None).await;

    let (status, _) = send(&app, Method::GET, "/ums/v1/applications/2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::DELETE, "/ums/v1/applications/2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "not_found");

    let next = create(&app, json!({"name": "c"})).await;
    assert_eq!(next.id, 3);
}

#[tokio::test]
async fn update_with_mismatched_id_is_rejected_and_leaves_record() {
    let app = test_app();
    let original = create(&app, json!({"name": "app", "password": "secret"})).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/ums/v1/applications/1",
        Some(json!({"id": 2, "name": "other"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "invalid_request");

    let (status, fetched) = send(&app, Method::GET, "/ums/v1/applications/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_value::<Application>(fetched).unwrap(), original);
}

#[tokio::test]
async fn update_accepts_legacy_app_id_key() {
    let app = test_app();
    create(&app, json!({"name": "app2"})).await;

    let (status, updated) = send(
        &app,
        Method::PUT,
        "/ums/v1/applications/1",
        Some(json!({"app_id": 1, "name": "app2", "password": "fungus"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated, json!({"id": 1, "name": "app2", "password": "fungus"}));
}

#[tokio::test]
async fn update_with_empty_password_regenerates_it() {
    let app = test_app();
    create(&app, json!({"name": "app", "password": "secret"})).await;

    let (status, updated) = send(
        &app,
        Method::PUT,
        "/ums/v1/applications/1",
        Some(json!({"password": ""})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let password = updated["password"].as_str().unwrap();
    assert_eq!(password.len(), 10);
    assert!(password.chars().all(|c| c.is_ascii_lowercase()));
    assert_eq!(updated["name"], "app");
}

#[tokio::test]
async fn update_error_statuses() {
    let app = test_app();

    let (status, body) = send(&app, Method::PUT, "/ums/v1/applications/9", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "empty body");

    let (status, _) = send(
        &app,
        Method::PUT,
        "/ums/v1/applications/9",
        Some(json!({"name": "ghost"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::PUT, "/ums/v1/applications/9", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_unknown_id_is_always_not_found() {
    let app = test_app();

    let (status, _) = send(&app, Method::GET, "/ums/v1/applications/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    create(&app, json!({"name": "a"})).await;
    let (status, _) = send(&app, Method::GET, "/ums/v1/applications/666", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn custom_base_path_moves_resource_routes() {
    let config = Config {
        api_base_path: "/api/v2".to_string(),
        ..Config::default()
    };
    let app = create_router(AppState::new(ApplicationStore::new()), &config);

    let (status, _) = send(&app, Method::GET, "/api/v2/applications", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::GET, "/ums/v1/applications", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
