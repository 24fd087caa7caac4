// ==============================
// tests/unit/middleware_tests.rs
// ==============================
//! Unit tests for the token gate
use std::sync::Arc;

use axum::{
    http::{Method, StatusCode},
    middleware,
    routing::get,
    Extension, Router,
};
use catalog_backend_lib::auth::{Claims, CredentialService, TokenSigner};
use catalog_backend_lib::middleware::require_token;
use catalog_backend_lib::AppState;

use crate::test_utils::{empty_request, send, test_settings, TEST_SECRET};

async fn whoami(Extension(claims): Extension<Claims>) -> String {
    claims.username
}

fn gated_router() -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::in_memory(&test_settings()));
    let app = Router::new()
        .route("/whoami", get(whoami))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_token))
        .with_state(state.clone());
    (app, state)
}

#[tokio::test]
async fn test_missing_header_is_unauthorized() {
    let (app, _) = gated_router();

    let (status, body) = send(&app, empty_request(Method::GET, "/whoami", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_garbage_token_is_forbidden() {
    let (app, _) = gated_router();

    let request = empty_request(Method::GET, "/whoami", Some("not-a-token"));
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_bearer_prefix_is_not_stripped() {
    let (app, state) = gated_router();
    let token = state.credentials.issue_token("alice").unwrap();

    let header = format!("Bearer {token}");
    let (status, _) = send(&app, empty_request(Method::GET, "/whoami", Some(&header))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_token_from_other_secret_is_forbidden() {
    let (app, _) = gated_router();
    let foreign = TokenSigner::new(b"some-other-secret", None)
        .issue("alice")
        .unwrap();

    let (status, _) = send(&app, empty_request(Method::GET, "/whoami", Some(&foreign))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_valid_token_passes_claims_through() {
    let (app, _) = gated_router();
    let token = TokenSigner::new(TEST_SECRET.as_bytes(), None)
        .issue("alice")
        .unwrap();

    let (status, body) = send(&app, empty_request(Method::GET, "/whoami", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"alice");
}
