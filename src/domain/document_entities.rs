use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DocumentCollection {
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StoredDocument {
    pub id: String,
    pub collection: String,
    pub body: Value,
    pub content_hash: String,
    pub created_at: DateTime<Utc>,
}

/// A document ready for insertion; the store assigns id and timestamp
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentInput {
    pub body: Value,
    pub content_hash: String,
}
