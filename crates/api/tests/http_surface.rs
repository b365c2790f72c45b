//! Integration tests for general HTTP behaviour: routing, auth
//! rejection, request IDs, and health reporting.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, get, request};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Test: unknown route returns 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = common::build_test_app(common::test_state());
    let response = get(app, "/this-route-does-not-exist", None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: authenticated routes reject missing / malformed / invalid tokens
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let app = common::build_test_app(common::test_state());
    let response = get(app, "/api/v1/profile/session", None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn malformed_auth_header_is_unauthorized() {
    let state = common::test_state();
    let app = common::build_test_app(state);
    let response = request(
        app,
        Method::GET,
        "/api/v1/profile/session",
        Some(""), // "Bearer " prefix present but empty token
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn garbage_token_is_unauthorized() {
    let app = common::build_test_app(common::test_state());
    let response = get(
        app,
        "/api/v1/onboarding/session",
        Some("not-a-real-token"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid or expired token");
}

// ---------------------------------------------------------------------------
// Test: a valid token with no open session yields 404, not 500
// ---------------------------------------------------------------------------

#[tokio::test]
async fn session_endpoints_require_an_open_session() {
    let app = common::build_test_app(common::test_state());
    let token = common::auth_token(Uuid::new_v4());

    let response = get(app, "/api/v1/profile/session", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Test: x-request-id header is present in responses
// ---------------------------------------------------------------------------

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let app = common::build_test_app(common::test_state());
    let response = get(app, "/health", None).await;

    let request_id = response.headers().get("x-request-id");
    assert!(
        request_id.is_some(),
        "Response must contain an x-request-id header"
    );

    // The value should be a valid UUID (36 chars with hyphens).
    let id_str = request_id.unwrap().to_str().unwrap();
    assert_eq!(id_str.len(), 36);
}

// ---------------------------------------------------------------------------
// Test: health reports degraded when the database is unreachable
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_db_state() {
    let app = common::build_test_app(common::test_state());
    let response = get(app, "/health", None).await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], false);
    assert!(json["version"].is_string());
}
