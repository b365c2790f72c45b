//! Shared helpers for API integration tests.
//!
//! Tests run against the production router built by `build_app_router`,
//! so the full middleware stack (CORS, request ID, timeout, panic
//! recovery) is exercised. The database pool is created lazily against an
//! unroutable address: tests cover the surfaces that do not require a
//! live database, plus the failure paths where an unreachable store IS
//! the scenario under test.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;
use uuid::Uuid;

use majlis_api::auth::jwt::{generate_access_token, JwtConfig};
use majlis_api::config::ServerConfig;
use majlis_api::router::build_app_router;
use majlis_api::session::SessionManager;
use majlis_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        allowed_email_domain: "majlis.org".to_string(),
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// A pool pointing at an unroutable address. Connections are only
/// attempted when a query runs, so handlers that never touch the
/// database work normally and handlers that do fail fast.
pub fn offline_pool() -> sqlx::PgPool {
    PgPoolOptions::new()
        .max_connections(2)
        // Fail fast instead of retrying connects until the default 30s
        // acquire timeout, so DB-dependent handlers surface their error
        // well before the request-timeout layer trips.
        .acquire_timeout(std::time::Duration::from_secs(2))
        .connect_lazy("postgres://postgres@127.0.0.1:1/majlis_test")
        .expect("lazy pool creation should not fail")
}

/// Build the shared state for a test app.
pub fn test_state() -> AppState {
    AppState {
        pool: offline_pool(),
        config: Arc::new(test_config()),
        sessions: Arc::new(SessionManager::new()),
    }
}

/// Build the full application router around the given state.
pub fn build_test_app(state: AppState) -> Router {
    let config = test_config();
    build_app_router(state, &config)
}

/// Issue a valid access token for the given member id.
pub fn auth_token(user_id: Uuid) -> String {
    generate_access_token(user_id, &test_config().jwt).expect("token generation should succeed")
}

/// Send a request through the router.
pub async fn request(
    app: Router,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.oneshot(request).await.expect("request should complete")
}

/// Convenience GET without a body.
pub async fn get(app: Router, path: &str, token: Option<&str>) -> Response<Body> {
    request(app, Method::GET, path, token, None).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}
