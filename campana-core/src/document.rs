//! Stored documents and their normalized JSON form.
//!
//! A [`StoredDocument`] is what a backend hands back: the identifier the store assigned
//! plus the document fields. A [`NormalizedDocument`] is the JSON object served to
//! callers, built by normalizing every field and injecting the identifier under `"id"`.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::{
    normalize::normalize_fields,
    value::{FieldMap, FieldValue},
};

/// Key under which the store-assigned identifier is exposed.
pub const ID_FIELD: &str = "id";

/// A document read from a store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    /// Identifier assigned by the store. Not part of `fields`.
    pub id: String,
    pub fields: FieldMap,
}

impl StoredDocument {
    pub fn new(id: impl Into<String>, fields: FieldMap) -> Self {
        Self { id: id.into(), fields }
    }

    /// Adds or replaces a field, returning the document for chaining.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }
}

/// A document whose values are all JSON-safe, with its identifier under `"id"`.
///
/// A stored field literally named `id` is shadowed by the identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NormalizedDocument(Map<String, Value>);

impl NormalizedDocument {
    pub fn id(&self) -> Option<&str> {
        self.0
            .get(ID_FIELD)
            .and_then(Value::as_str)
    }
}

impl From<StoredDocument> for NormalizedDocument {
    fn from(document: StoredDocument) -> Self {
        let mut map = normalize_fields(document.fields);
        map.insert(ID_FIELD.to_string(), Value::String(document.id));

        NormalizedDocument(map)
    }
}
