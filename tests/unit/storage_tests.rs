// ===========================
// tests/unit/storage_tests.rs
// ===========================
//! Storage backends wired through `AppState`
use std::sync::Arc;

use axum::http::{Method, StatusCode};
use catalog_backend_lib::config::{Settings, StorageBackend};
use catalog_backend_lib::router::create_router;
use catalog_backend_lib::storage::{all, FlatFileRepository, Repository, User};
use catalog_backend_lib::AppState;
use catalog_common::Product;
use serde_json::json;
use tempfile::TempDir;

use crate::test_utils::{
    create_product, get, json_request, product_body, product_ids, register_and_login, send,
    send_json, test_settings,
};

fn file_settings(dir: &TempDir) -> Settings {
    let mut settings = test_settings();
    settings.storage.backend = StorageBackend::File;
    settings.storage.path = dir.path().to_path_buf();
    settings
}

#[tokio::test]
async fn test_file_backend_survives_restart() {
    let dir = TempDir::new().unwrap();
    let settings = file_settings(&dir);

    {
        let state = AppState::from_settings(&settings).await.unwrap();
        let app = create_router(Arc::new(state));
        let token = register_and_login(&app, "alice", "pw1").await;
        create_product(&app, &token, &product_body("p-1", 10.0, Some(4.5), Some(true))).await;
    }

    assert!(dir.path().join("products.json").exists());
    assert!(dir.path().join("users.json").exists());

    let state = AppState::from_settings(&settings).await.unwrap();
    let app = create_router(Arc::new(state));

    // the stored hash still verifies after a reload
    let credentials = json!({ "username": "alice", "password": "pw1" });
    let (status, body) =
        send_json(&app, json_request(Method::POST, "/login", None, &credentials)).await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap();

    let (status, products) = send_json(&app, get("/products", Some(token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(product_ids(&products), vec!["p-1"]);
}

#[tokio::test]
async fn test_users_file_never_holds_plaintext() {
    let dir = TempDir::new().unwrap();
    let state = AppState::from_settings(&file_settings(&dir)).await.unwrap();
    let app = create_router(Arc::new(state));

    register_and_login(&app, "bob", "correct horse").await;

    let raw = std::fs::read_to_string(dir.path().join("users.json")).unwrap();
    assert!(raw.contains("bob"));
    assert!(!raw.contains("correct horse"));

    let users = FlatFileRepository::<User>::open(dir.path()).await.unwrap();
    let stored = users.find_many(&all::<User>).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert!(stored[0].password.starts_with("$2"));
}

#[tokio::test]
async fn test_memory_backend_starts_empty() {
    let settings = test_settings();
    assert_eq!(settings.storage.backend, StorageBackend::Memory);

    let state = AppState::from_settings(&settings).await.unwrap();
    assert!(state.products.find_many(&all::<Product>).await.unwrap().is_empty());

    let app = create_router(Arc::new(state));
    let (status, body) = send(&app, get("/products/featured", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"[]");
}
