// ============================
// catalog-backend-lib/src/storage.rs
// ============================
//! Repository abstraction with in-memory and flat-file implementations.
//!
//! Handlers only see [`Repository`]; every operation touches a single
//! document and is atomic on its own.
use async_trait::async_trait;
use catalog_common::Product;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

mod flat_file;
mod memory;

pub use flat_file::FlatFileRepository;
pub use memory::MemoryRepository;

/// Storage failures
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("duplicate key: {collection} already contains {key:?}")]
    Duplicate { collection: &'static str, key: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A record kept by a [`Repository`]
pub trait Document: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection name, also the file stem of the flat-file backend
    const COLLECTION: &'static str;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
    /// Value that must be unique across the collection
    fn unique_key(&self) -> &str;
}

pub type Predicate<'a, T> = &'a (dyn Fn(&T) -> bool + Send + Sync);
pub type Mutation<'a, T> = &'a (dyn Fn(&mut T) + Send + Sync);

/// Trait for storage backends
#[async_trait]
pub trait Repository<T: Document>: Send + Sync {
    /// Insert `doc`, assigning an id when it has none
    async fn save(&self, doc: T) -> Result<T, StorageError>;

    /// First document, in natural order, matching `predicate`
    async fn find_one(&self, predicate: Predicate<'_, T>) -> Result<Option<T>, StorageError>;

    /// Every document matching `predicate`, in natural (insertion) order
    async fn find_many(&self, predicate: Predicate<'_, T>) -> Result<Vec<T>, StorageError>;

    /// Apply `mutate` to the document with `id` and return the new version.
    /// `Ok(None)` when no such document exists.
    async fn update_by_id(
        &self,
        id: &str,
        mutate: Mutation<'_, T>,
    ) -> Result<Option<T>, StorageError>;

    /// Remove and return the document with `id`, `Ok(None)` if absent
    async fn delete_by_id(&self, id: &str) -> Result<Option<T>, StorageError>;
}

/// Predicate matching every document
pub fn all<T>(_: &T) -> bool {
    true
}

pub type ProductRepository = dyn Repository<Product>;
pub type UserRepository = dyn Repository<User>;

/// A registered user. `password` only ever holds a bcrypt hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub username: String,
    pub password: String,
}

impl User {
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            id: String::new(),
            username,
            password: password_hash,
        }
    }
}

impl Document for User {
    const COLLECTION: &'static str = "users";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn unique_key(&self) -> &str {
        &self.username
    }
}

impl Document for Product {
    const COLLECTION: &'static str = "products";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn unique_key(&self) -> &str {
        &self.product_id
    }
}
