//! Storage backend abstraction.
//!
//! The facade only ever reads, so a backend needs a single capability: return every
//! document of a collection that matches a [`Query`].
//!
//! # Traits
//!
//! - [`StoreBackend`]: The core trait for storage backends
//! - [`StoreBackendBuilder`]: Factory trait for creating backend instances
//!
//! # Examples
//!
//! ```ignore
//! use campana_core::{backend::StoreBackend, query::{Query, Filter}};
//!
//! let query = Query::builder()
//!     .filter(Filter::eq("campanaID", "XYZ"))
//!     .build();
//!
//! let documents = backend.query_documents(query, "campana").await?;
//! ```

use async_trait::async_trait;
use std::fmt::Debug;

use crate::{document::StoredDocument, error::DocumentStoreResult, query::Query};

/// Abstract interface for document storage backends.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; one backend instance is shared by every
/// request for the lifetime of the process, usually as an `Arc<dyn StoreBackend>`.
///
/// # Error Handling
///
/// Failures are reported as [`DocumentStoreError`](crate::error::DocumentStoreError)
/// and are never retried by callers.
#[async_trait]
pub trait StoreBackend: Send + Sync + Debug {
    /// Returns every document of `collection` matching `query`.
    ///
    /// Documents come back in the order the store yields them. A collection that does
    /// not exist yields an empty result.
    async fn query_documents(
        &self,
        query: Query,
        collection: &str,
    ) -> DocumentStoreResult<Vec<StoredDocument>>;
}

/// Factory for backend instances.
///
/// Building a backend is where credentials are checked and clients are created, so it
/// happens once at startup.
#[async_trait]
pub trait StoreBackendBuilder {
    type Backend: StoreBackend;

    async fn build(self) -> DocumentStoreResult<Self::Backend>;
}
