//! Core of the campana document facade.
//!
//! This crate holds everything that does not depend on a concrete store or on HTTP:
//!
//! - **Field values** ([`value`]) - The closed set of value kinds a document store can produce
//! - **Normalization** ([`normalize`]) - Conversion of field values into JSON-safe values
//! - **Documents** ([`document`]) - Stored documents and their normalized JSON form
//! - **Query API** ([`query`]) - Equality filters and a visitor for backend translation
//! - **Store backend abstraction** ([`backend`]) - Traits implemented by concrete stores
//! - **Collections** ([`collection`]) - The static collection registry and collection handles
//! - **Query service** ([`service`]) - Filtered fetches returning normalized documents
//! - **Error handling** ([`error`]) - Error and result types
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use campana_core::{collection::CollectionKey, service::CollectionQueryService};
//!
//! let service = CollectionQueryService::new(Arc::new(backend));
//! let documents = service.fetch(CollectionKey::Campana, "\"XYZ\"").await?;
//! ```

pub mod backend;
pub mod collection;
pub mod document;
pub mod error;
pub mod normalize;
pub mod query;
pub mod service;
pub mod value;
