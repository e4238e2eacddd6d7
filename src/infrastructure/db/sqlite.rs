use std::collections::HashSet;
use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use super::connection::init_document_db;
use super::document_store::DocumentStore;
use crate::domain::document_entities::{DocumentCollection, DocumentInput, StoredDocument};
use crate::domain::error::{AppError, Result};

pub struct SqliteDocumentStore {
    pool: SqlitePool,
}

impl SqliteDocumentStore {
    pub async fn open(db_path: &Path) -> Result<Self> {
        let pool = init_document_db(db_path).await?;
        Ok(Self { pool })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn collection_exists(&self, name: &str) -> Result<bool> {
        let found: Option<String> =
            sqlx::query_scalar("SELECT name FROM collections WHERE name = ?")
                .bind(name)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    AppError::DatabaseError(format!("Failed to look up collection: {}", e))
                })?;

        Ok(found.is_some())
    }

    async fn create_collection(&self, name: &str) -> Result<bool> {
        let result =
            sqlx::query("INSERT OR IGNORE INTO collections (name, created_at) VALUES (?, ?)")
                .bind(name)
                .bind(Utc::now())
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::DatabaseError(format!("Failed to create collection: {}", e))
                })?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_collections(&self) -> Result<Vec<DocumentCollection>> {
        let collections = sqlx::query_as::<_, CollectionEntity>(
            "SELECT name, created_at FROM collections ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to list collections: {}", e)))?;

        Ok(collections.into_iter().map(|c| c.into()).collect())
    }

    async fn insert_many(&self, collection: &str, documents: Vec<DocumentInput>) -> Result<u64> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to begin transaction: {}", e)))?;

        let now = Utc::now();
        let mut affected: u64 = 0;
        for document in documents {
            let res = sqlx::query(
                "INSERT INTO documents (id, collection, body_json, content_hash, created_at)
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(uuid::Uuid::new_v4().to_string())
            .bind(collection)
            .bind(document.body.to_string())
            .bind(&document.content_hash)
            .bind(now)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to insert document: {}", e)))?;
            affected += res.rows_affected();
        }

        tx.commit()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to commit transaction: {}", e)))?;

        Ok(affected)
    }

    async fn count(&self, collection: &str) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM documents WHERE collection = ?")
            .bind(collection)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to count documents: {}", e)))
    }

    async fn find(&self, collection: &str, limit: i64) -> Result<Vec<StoredDocument>> {
        let rows = sqlx::query_as::<_, DocumentEntity>(
            "SELECT id, collection, body_json, content_hash, created_at
             FROM documents WHERE collection = ? ORDER BY seq ASC LIMIT ?",
        )
        .bind(collection)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to fetch documents: {}", e)))?;

        rows.into_iter().map(StoredDocument::try_from).collect()
    }

    async fn existing_hashes(&self, collection: &str) -> Result<HashSet<String>> {
        let hashes = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT content_hash FROM documents WHERE collection = ?",
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to fetch content hashes: {}", e)))?;

        Ok(hashes.into_iter().collect())
    }
}

// Internal entities for database mapping
#[derive(sqlx::FromRow)]
struct CollectionEntity {
    name: String,
    created_at: DateTime<Utc>,
}

impl From<CollectionEntity> for DocumentCollection {
    fn from(e: CollectionEntity) -> Self {
        Self {
            name: e.name,
            created_at: e.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct DocumentEntity {
    id: String,
    collection: String,
    body_json: String,
    content_hash: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<DocumentEntity> for StoredDocument {
    type Error = AppError;

    fn try_from(e: DocumentEntity) -> Result<Self> {
        let body = serde_json::from_str(&e.body_json).map_err(|err| {
            AppError::DatabaseError(format!("Corrupt document body for {}: {}", e.id, err))
        })?;

        Ok(Self {
            id: e.id,
            collection: e.collection,
            body,
            content_hash: e.content_hash,
            created_at: e.created_at,
        })
    }
}
