//! Field values as produced by a document store.
//!
//! [`FieldValue`] is the closed set of value kinds a backend can hand back for a document
//! field. Backends convert their native representation into it, and the
//! [`normalize`](crate::normalize) module turns it into plain JSON.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde_json::{Number, Value};
use std::collections::BTreeMap;

/// Field name to value mapping of a document or nested sub-document.
pub type FieldMap = BTreeMap<String, FieldValue>;

/// A single value stored in a document field.
///
/// The store-specific kinds (`Timestamp`, `GeoPoint`, `Native`) are kept apart from the
/// plain structural kinds so that normalization can treat them before generic lists and
/// mappings.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    /// Store-native timestamp with nanosecond precision. Always an absolute instant.
    Timestamp(DateTime<Utc>),
    /// Generic date-time carrying a UTC offset.
    DateTime(DateTime<FixedOffset>),
    /// Generic date-time without any zone information.
    LocalDateTime(NaiveDateTime),
    GeoPoint(GeoPoint),
    Array(Vec<FieldValue>),
    Map(FieldMap),
    /// Store-native numeric representation that is not a plain `i64`/`f64`.
    Native(NativeNumber),
    /// A value of a kind this crate does not model, already in JSON shape.
    Other(Value),
}

/// Latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Numeric kinds that stores keep in their own width or encoding.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeNumber {
    Int32(i32),
    UInt32(u32),
    UInt64(u64),
    Float32(f32),
    /// 128-bit decimal, kept in its canonical textual form.
    Decimal(String),
}

impl FieldValue {
    /// Short name of the value kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Bool(_) => "bool",
            FieldValue::Integer(_) => "integer",
            FieldValue::Float(_) => "float",
            FieldValue::String(_) => "string",
            FieldValue::Timestamp(_) => "timestamp",
            FieldValue::DateTime(_) => "datetime",
            FieldValue::LocalDateTime(_) => "local_datetime",
            FieldValue::GeoPoint(_) => "geo_point",
            FieldValue::Array(_) => "array",
            FieldValue::Map(_) => "map",
            FieldValue::Native(_) => "native_number",
            FieldValue::Other(_) => "other",
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<GeoPoint> for FieldValue {
    fn from(value: GeoPoint) -> Self {
        FieldValue::GeoPoint(value)
    }
}

impl From<NativeNumber> for FieldValue {
    fn from(value: NativeNumber) -> Self {
        FieldValue::Native(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(value)
    }
}

impl From<DateTime<FixedOffset>> for FieldValue {
    fn from(value: DateTime<FixedOffset>) -> Self {
        FieldValue::DateTime(value)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(value: NaiveDateTime) -> Self {
        FieldValue::LocalDateTime(value)
    }
}

impl From<Vec<FieldValue>> for FieldValue {
    fn from(value: Vec<FieldValue>) -> Self {
        FieldValue::Array(value)
    }
}

impl From<FieldMap> for FieldValue {
    fn from(value: FieldMap) -> Self {
        FieldValue::Map(value)
    }
}

/// Reads plain JSON back into field values.
///
/// Integers that only fit in `u64` become [`NativeNumber::UInt64`] so that they keep
/// their exact value.
impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(b),
            Value::Number(n) => from_json_number(n),
            Value::String(s) => FieldValue::String(s),
            Value::Array(items) => FieldValue::Array(
                items
                    .into_iter()
                    .map(FieldValue::from)
                    .collect(),
            ),
            Value::Object(map) => FieldValue::Map(
                map
                    .into_iter()
                    .map(|(k, v)| (k, FieldValue::from(v)))
                    .collect(),
            ),
        }
    }
}

fn from_json_number(n: Number) -> FieldValue {
    if let Some(i) = n.as_i64() {
        FieldValue::Integer(i)
    } else if let Some(u) = n.as_u64() {
        FieldValue::Native(NativeNumber::UInt64(u))
    } else if let Some(f) = n.as_f64() {
        FieldValue::Float(f)
    } else {
        FieldValue::Other(Value::Number(n))
    }
}
