//! Conversion between BSON and campana field values.
//!
//! Reading maps every BSON type onto [`FieldValue`]. Type-specific shapes are recognised
//! before generic ones: a GeoJSON point sub-document becomes a geo-point rather than a
//! map. BSON types without a counterpart are kept as relaxed extended JSON.

use bson::{Bson, Document};
use chrono::{TimeZone, Utc};

use campana_core::{
    document::StoredDocument,
    error::{DocumentStoreError, DocumentStoreResult},
    value::{FieldMap, FieldValue, GeoPoint, NativeNumber},
};

/// Converts a BSON value read from MongoDB.
pub fn field_value(value: Bson) -> FieldValue {
    match value {
        Bson::Null | Bson::Undefined => FieldValue::Null,
        Bson::Boolean(b) => FieldValue::Bool(b),
        Bson::Int32(i) => FieldValue::Native(NativeNumber::Int32(i)),
        Bson::Int64(i) => FieldValue::Integer(i),
        Bson::Double(f) => FieldValue::Float(f),
        Bson::Decimal128(d) => FieldValue::Native(NativeNumber::Decimal(d.to_string())),
        Bson::String(s) => FieldValue::String(s),
        Bson::DateTime(dt) => FieldValue::DateTime(dt.to_chrono().fixed_offset()),
        Bson::Timestamp(ts) => match Utc.timestamp_opt(i64::from(ts.time), 0).single() {
            Some(instant) => FieldValue::Timestamp(instant),
            None => FieldValue::Other(Bson::Timestamp(ts).into_relaxed_extjson()),
        },
        Bson::Array(items) => FieldValue::Array(
            items
                .into_iter()
                .map(field_value)
                .collect(),
        ),
        Bson::Document(doc) => match geo_point(&doc) {
            Some(point) => FieldValue::GeoPoint(point),
            None => FieldValue::Map(field_map(doc)),
        },
        other => FieldValue::Other(other.into_relaxed_extjson()),
    }
}

/// Converts every field of a sub-document.
pub fn field_map(document: Document) -> FieldMap {
    document
        .into_iter()
        .map(|(k, v)| (k, field_value(v)))
        .collect()
}

/// Splits a MongoDB document into its `_id` and the remaining fields.
pub fn stored_document(mut document: Document) -> DocumentStoreResult<StoredDocument> {
    let id = match document.remove("_id") {
        Some(Bson::ObjectId(oid)) => oid.to_hex(),
        Some(Bson::String(s)) => s,
        Some(other) => other.into_relaxed_extjson().to_string(),
        None => return Err(DocumentStoreError::InvalidDocument("Document has no _id".into())),
    };

    Ok(StoredDocument::new(id, field_map(document)))
}

/// Converts a filter value into BSON.
///
/// Only scalar kinds and instants can be compared by MongoDB equality; a zone-less
/// date-time has no instant and is rejected.
pub fn filter_value(value: &FieldValue) -> DocumentStoreResult<Bson> {
    Ok(match value {
        FieldValue::Null => Bson::Null,
        FieldValue::Bool(b) => Bson::Boolean(*b),
        FieldValue::Integer(i) => Bson::Int64(*i),
        FieldValue::Float(f) => Bson::Double(*f),
        FieldValue::String(s) => Bson::String(s.clone()),
        FieldValue::Timestamp(t) => Bson::DateTime(bson::DateTime::from_chrono(*t)),
        FieldValue::DateTime(t) => Bson::DateTime(bson::DateTime::from_chrono(*t)),
        FieldValue::Native(NativeNumber::Int32(i)) => Bson::Int32(*i),
        FieldValue::Native(NativeNumber::UInt32(u)) => Bson::Int64(i64::from(*u)),
        FieldValue::Native(NativeNumber::Float32(f)) => Bson::Double(f64::from(*f)),
        other => {
            return Err(DocumentStoreError::InvalidQuery(format!(
                "cannot compare a {} value for equality",
                other.kind()
            )));
        }
    })
}

/// Recognises `{"type": "Point", "coordinates": [longitude, latitude]}`.
fn geo_point(document: &Document) -> Option<GeoPoint> {
    if document.len() != 2 || document.get_str("type").ok()? != "Point" {
        return None;
    }

    match document.get_array("coordinates").ok()?.as_slice() {
        [longitude, latitude] => Some(GeoPoint::new(number(latitude)?, number(longitude)?)),
        _ => None,
    }
}

fn number(value: &Bson) -> Option<f64> {
    match value {
        Bson::Double(f) => Some(*f),
        Bson::Int32(i) => Some(f64::from(*i)),
        Bson::Int64(i) => Some(*i as f64),
        _ => None,
    }
}
