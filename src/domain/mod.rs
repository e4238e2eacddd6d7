pub mod document_entities;
pub mod error;

// Listing import module
pub mod laptop;
