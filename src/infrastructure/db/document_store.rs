use std::collections::HashSet;

use async_trait::async_trait;

use crate::domain::document_entities::{DocumentCollection, DocumentInput, StoredDocument};
use crate::domain::error::Result;

/// A document-oriented store: named collections of JSON documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn collection_exists(&self, name: &str) -> Result<bool>;

    /// Create the collection. Returns `false` when it already existed.
    async fn create_collection(&self, name: &str) -> Result<bool>;

    async fn list_collections(&self) -> Result<Vec<DocumentCollection>>;

    /// Insert all documents as one unit. The collection must exist.
    async fn insert_many(&self, collection: &str, documents: Vec<DocumentInput>) -> Result<u64>;

    async fn count(&self, collection: &str) -> Result<i64>;

    /// Documents in insertion order
    async fn find(&self, collection: &str, limit: i64) -> Result<Vec<StoredDocument>>;

    async fn existing_hashes(&self, collection: &str) -> Result<HashSet<String>>;
}
