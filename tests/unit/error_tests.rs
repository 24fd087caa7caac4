// =========================
// tests/unit/error_tests.rs
// =========================
//! Unit tests for the error module
use axum::{
    body::to_bytes,
    http::StatusCode,
    response::IntoResponse,
};
use catalog_backend_lib::auth::CredentialError;
use catalog_backend_lib::error::{AppError, INTERNAL_MESSAGE};
use catalog_backend_lib::storage::StorageError;
use catalog_backend_lib::validation::ValidationError;
use serde_json::Value;

async fn error_body(err: AppError) -> (StatusCode, Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[test]
fn test_app_error_display() {
    assert_eq!(AppError::AuthFailed.to_string(), "Authentication failed");
    assert_eq!(AppError::UserNotFound.to_string(), "User not found");
    assert_eq!(
        AppError::Validation("Invalid id".to_string()).to_string(),
        "Invalid id"
    );
}

#[test]
fn test_error_codes_are_distinct() {
    let codes = [
        AppError::Validation(String::new()).error_code(),
        AppError::AuthMissing.error_code(),
        AppError::AuthInvalid.error_code(),
        AppError::AuthFailed.error_code(),
        AppError::UserNotFound.error_code(),
        AppError::NotFound(String::new()).error_code(),
        AppError::Internal(String::new()).error_code(),
    ];
    for (i, code) in codes.iter().enumerate() {
        assert!(!codes[i + 1..].contains(code), "{code} used twice");
    }
}

#[test]
fn test_validation_errors_map_to_bad_request() {
    let err: AppError = ValidationError::MissingFields("Product", vec!["name", "price"]).into();
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    assert!(err.to_string().contains("name, price"));

    let err: AppError = ValidationError::Duplicate("productID", "p-1".to_string()).into();
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
}

#[test]
fn test_storage_errors() {
    let duplicate = StorageError::Duplicate {
        collection: "users",
        key: "alice".to_string(),
    };
    assert_eq!(AppError::from(duplicate).status_code(), StatusCode::BAD_REQUEST);

    let io = StorageError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
    let err = AppError::from(io);
    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.client_message(), INTERNAL_MESSAGE);
}

#[test]
fn test_credential_errors() {
    let err = AppError::from(CredentialError::InvalidInput("empty password".into()));
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

    let err = AppError::from(CredentialError::InvalidToken("bad signature".into()));
    assert_eq!(err.status_code(), StatusCode::FORBIDDEN);

    let err = AppError::from(CredentialError::Hash("cost out of range".into()));
    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_error_body_shape() {
    let (status, body) = error_body(AppError::UserNotFound).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, serde_json::json!({ "error": "User not found" }));

    let (status, body) = error_body(AppError::Internal("connection reset".into())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], INTERNAL_MESSAGE);
}
