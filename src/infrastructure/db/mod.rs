pub mod connection;
pub mod document_store;
pub mod memory;
pub mod sqlite;

pub use document_store::DocumentStore;
pub use memory::InMemoryDocumentStore;
pub use sqlite::SqliteDocumentStore;
