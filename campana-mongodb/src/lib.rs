//! MongoDB backend implementation for campana.
//!
//! This crate provides a MongoDB-based implementation of the `StoreBackend` trait.
//!
//! # Features
//!
//! - **Credential documents** - Connection details come from a base64-encoded JSON document
//! - **Equality queries** - Filters are translated into MongoDB `$eq` queries
//! - **Value conversion** - BSON values are mapped onto the closed `FieldValue` set,
//!   including GeoJSON points and MongoDB's own timestamp and numeric types
//!
//! # Connection
//!
//! The client is created once from [`StoreCredentials`] and reused for every query. The
//! driver connects lazily, so building the store does not contact the server.
//!
//! # Example
//!
//! ```ignore
//! use campana_core::backend::StoreBackendBuilder;
//! use campana_mongodb::{MongoDbStore, StoreCredentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = StoreCredentials::from_base64(&std::env::var("STORE_KEY_B64")?)?;
//!     let store = MongoDbStore::from_credentials(&credentials)
//!         .build()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

pub mod convert;
pub mod credentials;
pub mod query;
pub mod store;

pub use credentials::StoreCredentials;
pub use store::{MongoDbStore, MongoDbStoreBuilder};
