// ============================
// catalog-backend-lib/src/lib.rs
// ============================
//! Core backend-lib functionality for the product catalog server.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod router;
pub mod storage;
pub mod validation;

use std::sync::Arc;

use catalog_common::Product;

use crate::auth::{BcryptJwtCredentials, CredentialService};
use crate::config::{Settings, StorageBackend};
use crate::storage::{
    FlatFileRepository, MemoryRepository, ProductRepository, StorageError, User, UserRepository,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Password hashing and token signing
    pub credentials: Arc<dyn CredentialService>,
    /// Product storage backend
    pub products: Arc<ProductRepository>,
    /// User storage backend
    pub users: Arc<UserRepository>,
    /// Settings the server was started with
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Create a new application state over the given repositories
    pub fn new(
        products: Arc<ProductRepository>,
        users: Arc<UserRepository>,
        config: &Settings,
    ) -> Self {
        Self {
            credentials: Arc::new(BcryptJwtCredentials::from_settings(&config.auth)),
            products,
            users,
            settings: Arc::new(config.clone()),
        }
    }

    /// State backed by empty in-memory repositories
    pub fn in_memory(config: &Settings) -> Self {
        Self::new(
            Arc::new(MemoryRepository::<Product>::new()),
            Arc::new(MemoryRepository::<User>::new()),
            config,
        )
    }

    /// State backed by whichever repositories `storage.backend` selects
    pub async fn from_settings(config: &Settings) -> Result<Self, StorageError> {
        match config.storage.backend {
            StorageBackend::Memory => Ok(Self::in_memory(config)),
            StorageBackend::File => {
                let products = FlatFileRepository::<Product>::open(&config.storage.path).await?;
                let users = FlatFileRepository::<User>::open(&config.storage.path).await?;
                Ok(Self::new(Arc::new(products), Arc::new(users), config))
            },
        }
    }
}
