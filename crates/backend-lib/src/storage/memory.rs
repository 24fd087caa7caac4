use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use super::{Document, Mutation, Predicate, Repository, StorageError};

/// Vec-backed repository; natural order is insertion order
#[derive(Debug)]
pub struct MemoryRepository<T> {
    docs: RwLock<Vec<T>>,
}

impl<T: Document> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Document> MemoryRepository<T> {
    pub fn new() -> Self {
        Self::with_documents(Vec::new())
    }

    pub fn with_documents(docs: Vec<T>) -> Self {
        Self {
            docs: RwLock::new(docs),
        }
    }

    pub fn len(&self) -> usize {
        self.docs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.read().is_empty()
    }

    pub(crate) fn snapshot(&self) -> Vec<T> {
        self.docs.read().clone()
    }

    /// Swap in a collection staged with the `*_in` helpers
    pub(crate) fn replace(&self, docs: Vec<T>) {
        *self.docs.write() = docs;
    }

    pub(crate) fn first(&self, predicate: Predicate<'_, T>) -> Option<T> {
        self.docs.read().iter().find(|d| predicate(d)).cloned()
    }

    pub(crate) fn filter(&self, predicate: Predicate<'_, T>) -> Vec<T> {
        self.docs
            .read()
            .iter()
            .filter(|d| predicate(d))
            .cloned()
            .collect()
    }
}

fn duplicate<T: Document>(key: &str) -> StorageError {
    StorageError::Duplicate {
        collection: T::COLLECTION,
        key: key.to_string(),
    }
}

/// Append `doc`, assigning an id when it has none
pub(crate) fn insert_in<T: Document>(docs: &mut Vec<T>, mut doc: T) -> Result<T, StorageError> {
    if docs.iter().any(|d| d.unique_key() == doc.unique_key()) {
        return Err(duplicate::<T>(doc.unique_key()));
    }
    if doc.id().is_empty() {
        doc.set_id(Uuid::new_v4().to_string());
    }
    docs.push(doc.clone());
    Ok(doc)
}

/// Apply `mutate` to the document with `id`; `docs` is untouched on error
pub(crate) fn modify_in<T: Document>(
    docs: &mut [T],
    id: &str,
    mutate: Mutation<'_, T>,
) -> Result<Option<T>, StorageError> {
    let Some(index) = docs.iter().position(|d| d.id() == id) else {
        return Ok(None);
    };

    let mut updated = docs[index].clone();
    mutate(&mut updated);
    updated.set_id(id.to_string());

    let clash = docs
        .iter()
        .enumerate()
        .any(|(i, d)| i != index && d.unique_key() == updated.unique_key());
    if clash {
        return Err(duplicate::<T>(updated.unique_key()));
    }

    docs[index] = updated.clone();
    Ok(Some(updated))
}

pub(crate) fn remove_in<T: Document>(docs: &mut Vec<T>, id: &str) -> Option<T> {
    let index = docs.iter().position(|d| d.id() == id)?;
    Some(docs.remove(index))
}

#[async_trait]
impl<T: Document> Repository<T> for MemoryRepository<T> {
    async fn save(&self, doc: T) -> Result<T, StorageError> {
        insert_in(&mut self.docs.write(), doc)
    }

    async fn find_one(&self, predicate: Predicate<'_, T>) -> Result<Option<T>, StorageError> {
        Ok(self.first(predicate))
    }

    async fn find_many(&self, predicate: Predicate<'_, T>) -> Result<Vec<T>, StorageError> {
        Ok(self.filter(predicate))
    }

    async fn update_by_id(
        &self,
        id: &str,
        mutate: Mutation<'_, T>,
    ) -> Result<Option<T>, StorageError> {
        modify_in(&mut self.docs.write(), id, mutate)
    }

    async fn delete_by_id(&self, id: &str) -> Result<Option<T>, StorageError> {
        Ok(remove_in(&mut self.docs.write(), id))
    }
}
