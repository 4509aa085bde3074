//! In-memory storage implementation.
//!
//! Documents are kept per collection in insertion order behind an async-aware
//! read-write lock.

use async_trait::async_trait;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;

use campana_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    document::StoredDocument,
    error::{DocumentStoreError, DocumentStoreResult},
    query::Query,
};

use crate::evaluator::DocumentEvaluator;

type CollectionDocs = Vec<StoredDocument>;
type StoreMap = HashMap<String, CollectionDocs>;

/// Thread-safe in-memory document storage backend.
///
/// `InMemoryStore` is cloneable; clones share the same underlying data.
///
/// # Performance
///
/// Queries scan every document of the collection. There is no indexing.
///
/// # Example
///
/// ```ignore
/// use campana_memory::InMemoryStore;
/// use campana_core::{backend::StoreBackend, document::StoredDocument, query::Query, value::FieldMap};
///
/// let store = InMemoryStore::new();
/// store
///     .insert_documents(vec![StoredDocument::new("doc-1", FieldMap::new())], "campana")
///     .await?;
///
/// let docs = store.query_documents(Query::new(), "campana").await?;
/// assert_eq!(docs.len(), 1);
/// ```
#[derive(Default, Clone, Debug)]
pub struct InMemoryStore {
    /// collection_name -> documents in insertion order
    store: Arc<RwLock<StoreMap>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory document store.
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(StoreMap::new())),
        }
    }

    /// Creates a builder that can seed collections before the store is handed out.
    pub fn builder() -> InMemoryStoreBuilder {
        InMemoryStoreBuilder::default()
    }

    /// Adds documents to a collection, creating it if needed.
    ///
    /// Fails without inserting anything when an identifier is already taken.
    pub async fn insert_documents(
        &self,
        documents: Vec<StoredDocument>,
        collection: &str,
    ) -> DocumentStoreResult<()> {
        let mut store = self.store.write().await;
        let existing = store
            .entry(collection.to_string())
            .or_default();

        for (index, document) in documents.iter().enumerate() {
            let taken = existing.iter().any(|doc| doc.id == document.id)
                || documents[..index].iter().any(|doc| doc.id == document.id);

            if taken {
                return Err(DocumentStoreError::DocumentAlreadyExists(
                    document.id.clone(),
                    collection.to_string(),
                ));
            }
        }

        existing.extend(documents);

        Ok(())
    }
}

#[async_trait]
impl StoreBackend for InMemoryStore {
    async fn query_documents(
        &self,
        query: Query,
        collection: &str,
    ) -> DocumentStoreResult<Vec<StoredDocument>> {
        let store = self.store.read().await;
        let documents = match store.get(collection) {
            Some(docs) => docs,
            None => return Ok(vec![]),
        };

        match &query.filter {
            Some(filter) => DocumentEvaluator::filter_documents(documents, filter),
            None => Ok(documents.clone()),
        }
    }
}

/// Builder for [`InMemoryStore`] instances with optional seed data.
///
/// # Example
///
/// ```ignore
/// use campana_memory::InMemoryStore;
/// use campana_core::backend::StoreBackendBuilder;
///
/// let store = InMemoryStore::builder()
///     .with_documents("Estacion", estaciones)
///     .build()
///     .await?;
/// ```
#[derive(Default)]
pub struct InMemoryStoreBuilder {
    seed: Vec<(String, Vec<StoredDocument>)>,
}

impl InMemoryStoreBuilder {
    /// Queues documents to be inserted into `collection` when the store is built.
    pub fn with_documents(mut self, collection: &str, documents: Vec<StoredDocument>) -> Self {
        self.seed.push((collection.to_string(), documents));
        self
    }
}

#[async_trait]
impl StoreBackendBuilder for InMemoryStoreBuilder {
    type Backend = InMemoryStore;

    /// Builds the store and inserts the queued documents.
    async fn build(self) -> DocumentStoreResult<Self::Backend> {
        let store = InMemoryStore::new();

        for (collection, documents) in self.seed {
            store
                .insert_documents(documents, &collection)
                .await?;
        }

        Ok(store)
    }
}
