//! In-memory document storage backend for campana.
//!
//! This crate provides a thread-safe, in-memory implementation of the `StoreBackend` trait.
//! Documents are kept in insertion order per collection and queried by scanning, which
//! makes it a good fit for tests and local experiments.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use campana_core::{backend::StoreBackendBuilder, document::StoredDocument, value::FieldMap};
//! use campana_memory::InMemoryStore;
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = InMemoryStore::builder()
//!         .with_documents("campana", vec![
//!             StoredDocument::new("doc-1", FieldMap::new()).with_field("campanaID", "XYZ"),
//!         ])
//!         .build()
//!         .await
//!         .unwrap();
//!
//!     let service = campana_core::service::CollectionQueryService::new(Arc::new(store));
//! }
//! ```

pub mod evaluator;
pub mod store;

pub use store::{InMemoryStore, InMemoryStoreBuilder};
