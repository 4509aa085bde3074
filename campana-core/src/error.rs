//! Error types and result types for document store operations.
//!
//! Use [`DocumentStoreResult<T>`] as the return type for fallible store operations.

use thiserror::Error;

/// Represents all errors that can occur while reading from a document store.
#[derive(Error, Debug)]
pub enum DocumentStoreError {
    /// Error during store initialization or connection setup.
    #[error("Initialization error: {0}")]
    Initialization(String),
    /// An error occurred in the underlying storage backend.
    #[error("Backend error: {0}")]
    Backend(String),
    /// A document with the given ID already exists in the collection.
    /// The first argument is the document ID, the second is the collection name.
    #[error("Document {0} already exists in collection {1}")]
    DocumentAlreadyExists(String, String),
    /// The query cannot be expressed by the backend.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
    /// A stored document has a shape the backend cannot read.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}

/// A specialized `Result` type for document store operations.
pub type DocumentStoreResult<T> = Result<T, DocumentStoreError>;
