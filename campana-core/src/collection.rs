//! The static collection registry and collection handles.
//!
//! Every collection the facade serves is known at compile time: a [`CollectionKey`]
//! names it, and its [`CollectionConfig`] says which physical collection to read and
//! which field carries the campaign identifier.
//!
//! # Example
//!
//! ```ignore
//! use campana_core::collection::{Collection, CollectionKey};
//!
//! let estaciones = Collection::new(CollectionKey::Estacion, &backend);
//! let documents = estaciones.find_by_filter_value("XYZ").await?;
//! ```

use std::fmt;

use crate::{
    backend::StoreBackend,
    document::StoredDocument,
    error::DocumentStoreResult,
    query::{Filter, Query},
    value::FieldValue,
};

/// Static description of a served collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionConfig {
    /// Logical key used by callers.
    pub key: &'static str,
    /// Name of the collection in the store.
    pub name: &'static str,
    /// Field compared against the campaign identifier.
    pub filter_field: &'static str,
}

static CAMPANA: CollectionConfig = CollectionConfig {
    key: "campana",
    name: "campana",
    filter_field: "campanaID",
};

static ESTACION: CollectionConfig = CollectionConfig {
    key: "estacion",
    name: "Estacion",
    filter_field: "campanaID",
};

/// Logical collections served by the facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKey {
    Campana,
    Estacion,
}

impl CollectionKey {
    pub const ALL: [CollectionKey; 2] = [CollectionKey::Campana, CollectionKey::Estacion];

    pub fn config(self) -> &'static CollectionConfig {
        match self {
            CollectionKey::Campana => &CAMPANA,
            CollectionKey::Estacion => &ESTACION,
        }
    }

    pub fn as_str(self) -> &'static str {
        self.config().key
    }
}

impl fmt::Display for CollectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered collection bound to a backend.
#[derive(Debug)]
pub struct Collection<'a> {
    config: &'static CollectionConfig,
    backend: &'a dyn StoreBackend,
}

impl<'a> Collection<'a> {
    pub fn new(key: CollectionKey, backend: &'a dyn StoreBackend) -> Self {
        Self {
            config: key.config(),
            backend,
        }
    }

    pub fn name(&self) -> &str {
        self.config.name
    }

    pub fn config(&self) -> &'static CollectionConfig {
        self.config
    }

    /// Returns every document whose filter field equals `value`.
    pub async fn find_by_filter_value(
        &self,
        value: impl Into<FieldValue>,
    ) -> DocumentStoreResult<Vec<StoredDocument>> {
        self.backend
            .query_documents(
                Query::builder()
                    .filter(Filter::eq(self.config.filter_field, value))
                    .build(),
                self.config.name,
            )
            .await
    }
}
