#![allow(dead_code)] // Each test binary uses a different subset of helpers.

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use roomio_api::auth::jwt::{generate_access_token, JwtConfig};
use roomio_api::config::ServerConfig;
use roomio_api::router::build_app_router;
use roomio_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT
/// secret, so tokens minted by [`bearer_token`] validate against the
/// app under test.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router with all middleware layers, using
/// the given database pool.
///
/// This goes through [`build_app_router`] so integration tests exercise
/// the same middleware stack (CORS, request ID, timeout, tracing, panic
/// recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Mint a valid access token for the given user id.
pub fn bearer_token(user_id: i64) -> String {
    let token = generate_access_token(user_id, &test_config().jwt)
        .expect("token generation should succeed");
    format!("Bearer {token}")
}

/// Create a test user directly in the database.
pub async fn create_user(pool: &PgPool, username: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO users (username, display_name) VALUES ($1, $1) RETURNING id",
    )
    .bind(username)
    .fetch_one(pool)
    .await
    .expect("failed to insert user")
}

/// Send an unauthenticated GET request.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send an authenticated GET request as the given user.
pub async fn get_auth(app: Router, uri: &str, user_id: i64) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(AUTHORIZATION, bearer_token(user_id))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send an authenticated POST request with a JSON body.
pub async fn post_json_auth(
    app: Router,
    uri: &str,
    user_id: i64,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(AUTHORIZATION, bearer_token(user_id))
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send an authenticated POST request with an empty body.
pub async fn post_auth(app: Router, uri: &str, user_id: i64) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(AUTHORIZATION, bearer_token(user_id))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send an unauthenticated POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send an authenticated DELETE request.
pub async fn delete_auth(app: Router, uri: &str, user_id: i64) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header(AUTHORIZATION, bearer_token(user_id))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Read the response body to completion and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read response body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be valid JSON")
}
