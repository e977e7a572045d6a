#![allow(dead_code)]

use std::path::{Path, PathBuf};

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use heroes_api::config::ServerConfig;
use heroes_api::router::build_app_router;
use heroes_api::state::AppState;

/// Boundary used by [`post_multipart`].
pub const BOUNDARY: &str = "heroes-test-boundary";

/// Build a test `ServerConfig` with safe defaults.
///
/// Allows any CORS origin (the production default) and uses a 30-second
/// request timeout.
pub fn test_config(upload_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["*".to_string()],
        request_timeout_secs: 30,
        upload_dir: upload_dir.to_path_buf(),
        max_body_bytes: 10 * 1024 * 1024,
    }
}

fn default_upload_dir() -> PathBuf {
    std::env::temp_dir().join("heroes-api-tests")
}

/// Build the full application router with all middleware layers, using the
/// given database pool. Goes through the same `build_app_router` as `main.rs`.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_uploads(pool, &default_upload_dir())
}

/// Same as [`build_test_app`] but writes uploads into `upload_dir`.
pub fn build_test_app_with_uploads(pool: PgPool, upload_dir: &Path) -> Router {
    build_test_app_with_config(pool, test_config(upload_dir))
}

pub fn build_test_app_with_config(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState::new(pool, config.clone());
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    json_request(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    json_request(app, Method::PUT, uri, body).await
}

async fn json_request(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response {
    post_raw(app, method, uri, "application/json", body.to_string().into_bytes()).await
}

pub async fn post_raw(
    app: Router,
    method: Method,
    uri: &str,
    content_type: &str,
    body: Vec<u8>,
) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

/// A part of a multipart body: `(field name, optional file name, bytes)`.
pub type Part<'a> = (&'a str, Option<&'a str>, &'a [u8]);

/// Encode `parts` as `multipart/form-data` and POST them.
pub async fn post_multipart(app: Router, uri: &str, parts: &[Part<'_>]) -> Response {
    let mut body = Vec::new();
    for (name, file_name, data) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match file_name {
            Some(file_name) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
            }
        }
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    post_raw(
        app,
        Method::POST,
        uri,
        &format!("multipart/form-data; boundary={BOUNDARY}"),
        body,
    )
    .await
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Create a hero through the API and return its id.
pub async fn create_hero(pool: &PgPool, body: serde_json::Value) -> i64 {
    let response = post_json(build_test_app(pool.clone()), "/api/heroes", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}
