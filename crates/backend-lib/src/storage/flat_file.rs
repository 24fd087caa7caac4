use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::{fs as tokio_fs, sync::Mutex};

use super::memory::{insert_in, modify_in, remove_in};
use super::{Document, MemoryRepository, Mutation, Predicate, Repository, StorageError};

/// Repository persisted as one JSON array per collection (`<root>/<collection>.json`).
///
/// Reads are served from memory. Every mutation is applied to a staged copy,
/// written through a temporary sibling and a rename, and only then made
/// visible. Writers are serialized by `write_lock`.
#[derive(Debug)]
pub struct FlatFileRepository<T> {
    path: PathBuf,
    docs: MemoryRepository<T>,
    write_lock: Mutex<()>,
}

impl<T: Document> FlatFileRepository<T> {
    /// Open the collection under `root`, loading any previously saved documents
    pub async fn open(root: impl AsRef<Path>) -> Result<Self, StorageError> {
        let root = root.as_ref();
        tokio_fs::create_dir_all(root).await?;

        let path = root.join(format!("{}.json", T::COLLECTION));
        let docs: Vec<T> = match tokio_fs::read(&path).await {
            Ok(bytes) if bytes.is_empty() => Vec::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        tracing::debug!(
            collection = T::COLLECTION,
            count = docs.len(),
            path = %path.display(),
            "collection loaded"
        );

        Ok(Self {
            path,
            docs: MemoryRepository::with_documents(docs),
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, docs: &[T]) -> Result<(), StorageError> {
        let json = serde_json::to_vec_pretty(docs)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio_fs::write(&tmp, json).await?;
        tokio_fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    /// Write `staged` to disk, then publish it to readers
    async fn commit(&self, staged: Vec<T>) -> Result<(), StorageError> {
        if let Err(e) = self.persist(&staged).await {
            tracing::error!(
                collection = T::COLLECTION,
                error = %e,
                "write failed, change discarded"
            );
            return Err(e);
        }
        self.docs.replace(staged);
        Ok(())
    }
}

#[async_trait]
impl<T: Document> Repository<T> for FlatFileRepository<T> {
    async fn save(&self, doc: T) -> Result<T, StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut staged = self.docs.snapshot();
        let saved = insert_in(&mut staged, doc)?;
        self.commit(staged).await?;
        Ok(saved)
    }

    async fn find_one(&self, predicate: Predicate<'_, T>) -> Result<Option<T>, StorageError> {
        Ok(self.docs.first(predicate))
    }

    async fn find_many(&self, predicate: Predicate<'_, T>) -> Result<Vec<T>, StorageError> {
        Ok(self.docs.filter(predicate))
    }

    async fn update_by_id(
        &self,
        id: &str,
        mutate: Mutation<'_, T>,
    ) -> Result<Option<T>, StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut staged = self.docs.snapshot();
        let updated = modify_in(&mut staged, id, mutate)?;
        if updated.is_some() {
            self.commit(staged).await?;
        }
        Ok(updated)
    }

    async fn delete_by_id(&self, id: &str) -> Result<Option<T>, StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut staged = self.docs.snapshot();
        let removed = remove_in(&mut staged, id);
        if removed.is_some() {
            self.commit(staged).await?;
        }
        Ok(removed)
    }
}
