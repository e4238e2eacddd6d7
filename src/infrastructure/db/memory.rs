use std::collections::{BTreeMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use super::document_store::DocumentStore;
use crate::domain::document_entities::{DocumentCollection, DocumentInput, StoredDocument};
use crate::domain::error::{AppError, Result};

/// Process-local store, used by tests.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    collections: Mutex<BTreeMap<String, MemoryCollection>>,
}

struct MemoryCollection {
    created_at: chrono::DateTime<Utc>,
    documents: Vec<StoredDocument>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<String, MemoryCollection>>> {
        self.collections
            .lock()
            .map_err(|_| AppError::Internal("In-memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn collection_exists(&self, name: &str) -> Result<bool> {
        Ok(self.lock()?.contains_key(name))
    }

    async fn create_collection(&self, name: &str) -> Result<bool> {
        let mut collections = self.lock()?;
        if collections.contains_key(name) {
            return Ok(false);
        }
        collections.insert(
            name.to_string(),
            MemoryCollection {
                created_at: Utc::now(),
                documents: Vec::new(),
            },
        );
        Ok(true)
    }

    async fn list_collections(&self) -> Result<Vec<DocumentCollection>> {
        Ok(self
            .lock()?
            .iter()
            .map(|(name, c)| DocumentCollection {
                name: name.clone(),
                created_at: c.created_at,
            })
            .collect())
    }

    async fn insert_many(&self, collection: &str, documents: Vec<DocumentInput>) -> Result<u64> {
        let mut collections = self.lock()?;
        let target = collections
            .get_mut(collection)
            .ok_or_else(|| AppError::NotFound(format!("Collection not found: {}", collection)))?;

        let now = Utc::now();
        let count = documents.len() as u64;
        target
            .documents
            .extend(documents.into_iter().map(|d| StoredDocument {
                id: uuid::Uuid::new_v4().to_string(),
                collection: collection.to_string(),
                body: d.body,
                content_hash: d.content_hash,
                created_at: now,
            }));

        Ok(count)
    }

    async fn count(&self, collection: &str) -> Result<i64> {
        Ok(self
            .lock()?
            .get(collection)
            .map(|c| c.documents.len() as i64)
            .unwrap_or(0))
    }

    async fn find(&self, collection: &str, limit: i64) -> Result<Vec<StoredDocument>> {
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(self
            .lock()?
            .get(collection)
            .map(|c| c.documents.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }

    async fn existing_hashes(&self, collection: &str) -> Result<HashSet<String>> {
        Ok(self
            .lock()?
            .get(collection)
            .map(|c| c.documents.iter().map(|d| d.content_hash.clone()).collect())
            .unwrap_or_default())
    }
}
