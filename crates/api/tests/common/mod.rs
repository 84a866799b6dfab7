#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use buildcheck_api::config::ServerConfig;
use buildcheck_api::router::build_app_router;
use buildcheck_api::state::AppState;
use buildcheck_core::catalog::Catalog;
use http_body_util::BodyExt;
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
        catalog_path: None,
        max_sessions: 100,
        session_ttl_secs: 3600,
        session_sweep_interval_secs: 60,
    }
}

/// Build the full application router over the built-in catalog.
///
/// Returns the state as well so tests can share one session store across
/// several `oneshot` calls.
pub fn build_test_app_with(config: ServerConfig) -> (Router, AppState) {
    let catalog = Catalog::builtin().expect("built-in catalog must load");
    let state = AppState::new(config.clone(), catalog);
    let app = build_app_router(state.clone(), &config);
    (app, state)
}

pub fn build_test_app() -> Router {
    build_test_app_with(test_config()).0
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_empty(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Start a build session and return its id.
pub async fn create_session(app: &Router) -> String {
    let response = post_empty(app.clone(), "/api/v1/build").await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    let json = body_json(response).await;
    json["data"]["session_id"].as_str().unwrap().to_string()
}

/// Select `component_id` for `category` in session `id`.
pub async fn select(
    app: &Router,
    id: &str,
    category: &str,
    component_id: Option<i64>,
) -> Response<Body> {
    post_json(
        app.clone(),
        &format!("/api/v1/build/{id}/select"),
        serde_json::json!({ "category": category, "component_id": component_id }),
    )
    .await
}
