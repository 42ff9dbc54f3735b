#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tasktracker_api::config::ServerConfig;
use tasktracker_api::router::build_app_router;
use tasktracker_api::state::AppState;
use tasktracker_core::store::MemoryStore;
use tasktracker_db::PgStore;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        db_max_connections: 5,
    }
}

/// Build the full application router over a fresh in-memory store.
///
/// The router is cheap to clone and every clone shares the same store, so a
/// test can issue several requests against one dataset.
pub fn build_test_app() -> Router {
    let state = AppState::new(MemoryStore::new(), "memory", test_config());
    build_app_router(state).expect("test config should build a router")
}

/// Build the full application router over a PostgreSQL pool.
pub fn build_pg_test_app(pool: PgPool) -> Router {
    let state = AppState::new(PgStore::new(pool), "postgres", test_config());
    build_app_router(state).expect("test config should build a router")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

async fn send_json(app: &Router, method: Method, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    send(app, request).await
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    send_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    send_json(app, Method::PUT, uri, body).await
}

pub async fn patch(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::PATCH)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Send a request with a raw, possibly malformed, JSON body.
pub async fn post_raw(app: &Router, uri: &str, body: &'static str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

// ---------------------------------------------------------------------------
// Payload builders
// ---------------------------------------------------------------------------

pub fn project_body(name: &str, priority: i32, status: &str) -> Value {
    serde_json::json!({
        "name": name,
        "start_date": "2024-01-01T00:00:00Z",
        "complete_date": "2024-02-01T00:00:00Z",
        "priority": priority,
        "status": status,
    })
}

pub fn task_body(name: &str, priority: i32, project_id: i64) -> Value {
    serde_json::json!({
        "name": name,
        "description": format!("{name} details"),
        "priority": priority,
        "status": "ToDo",
        "project_id": project_id,
    })
}

/// Create a project and return its id.
pub async fn create_project(app: &Router, name: &str, priority: i32, status: &str) -> i64 {
    let response = post_json(app, "/projects", project_body(name, priority, status)).await;
    assert_eq!(response.status(), 200, "project create failed");
    body_json(response).await["id"].as_i64().unwrap()
}

/// Create a task and return its id.
pub async fn create_task(app: &Router, name: &str, priority: i32, project_id: i64) -> i64 {
    let response = post_json(app, "/tasks", task_body(name, priority, project_id)).await;
    assert_eq!(response.status(), 200, "task create failed");
    body_json(response).await["id"].as_i64().unwrap()
}
