//! Query expression evaluation for in-memory document filtering.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;

use campana_core::{
    document::StoredDocument,
    error::{DocumentStoreError, DocumentStoreResult},
    query::{Expr, QueryVisitor},
    value::{FieldValue, NativeNumber},
};

/// Comparable representation of field values.
///
/// Integer kinds are widened to `i128` and compared exactly; they are compared as `f64`
/// only against a float. Instants are folded into UTC, so that an `Int32` field matches an
/// `Integer` filter value with the same number.
#[derive(Debug)]
pub(crate) enum Comparable<'a> {
    Null,
    Bool(bool),
    Int(i128),
    Number(f64),
    String(&'a str),
    Instant(DateTime<Utc>),
    Local(NaiveDateTime),
    Geo(f64, f64),
    Array(Vec<Comparable<'a>>),
    Map(HashMap<&'a str, Comparable<'a>>),
    Other(&'a Value),
}

impl<'a> From<&'a FieldValue> for Comparable<'a> {
    fn from(value: &'a FieldValue) -> Self {
        match value {
            FieldValue::Null => Comparable::Null,
            FieldValue::Bool(b) => Comparable::Bool(*b),
            FieldValue::Integer(i) => Comparable::Int(i128::from(*i)),
            FieldValue::Float(f) => Comparable::Number(*f),
            FieldValue::String(s) => Comparable::String(s),
            FieldValue::Timestamp(t) => Comparable::Instant(*t),
            FieldValue::DateTime(t) => Comparable::Instant(t.with_timezone(&Utc)),
            FieldValue::LocalDateTime(t) => Comparable::Local(*t),
            FieldValue::GeoPoint(p) => Comparable::Geo(p.latitude, p.longitude),
            FieldValue::Array(items) => Comparable::Array(
                items
                    .iter()
                    .map(Comparable::from)
                    .collect::<Vec<_>>()
            ),
            FieldValue::Map(fields) => Comparable::Map(
                fields
                    .iter()
                    .map(|(k, v)| (k.as_str(), Comparable::from(v)))
                    .collect::<HashMap<_, _>>()
            ),
            FieldValue::Native(number) => match number {
                NativeNumber::Int32(i) => Comparable::Int(i128::from(*i)),
                NativeNumber::UInt32(u) => Comparable::Int(i128::from(*u)),
                NativeNumber::UInt64(u) => Comparable::Int(i128::from(*u)),
                NativeNumber::Float32(f) => Comparable::Number(f64::from(*f)),
                NativeNumber::Decimal(text) => match text.parse::<i128>() {
                    Ok(i) => Comparable::Int(i),
                    Err(_) => text
                        .parse::<f64>()
                        .map(Comparable::Number)
                        .unwrap_or(Comparable::String(text)),
                },
            },
            FieldValue::Other(value) => Comparable::Other(value),
        }
    }
}

impl<'a> PartialEq for Comparable<'a> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Comparable::Null, Comparable::Null) => true,
            (Comparable::Bool(a), Comparable::Bool(b)) => a == b,
            (Comparable::Int(a), Comparable::Int(b)) => a == b,
            (Comparable::Number(a), Comparable::Number(b)) => a == b,
            (Comparable::Int(i), Comparable::Number(f)) | (Comparable::Number(f), Comparable::Int(i)) => {
                *i as f64 == *f
            }
            (Comparable::String(a), Comparable::String(b)) => a == b,
            (Comparable::Instant(a), Comparable::Instant(b)) => a == b,
            (Comparable::Local(a), Comparable::Local(b)) => a == b,
            (Comparable::Geo(a, b), Comparable::Geo(c, d)) => a == c && b == d,
            (Comparable::Array(a), Comparable::Array(b)) => a == b,
            (Comparable::Map(a), Comparable::Map(b)) => a == b,
            (Comparable::Other(a), Comparable::Other(b)) => a == b,
            _ => false,
        }
    }
}

pub(crate) struct DocumentEvaluator<'a> {
    document: &'a StoredDocument,
}

impl<'a> DocumentEvaluator<'a> {
    pub fn new(document: &'a StoredDocument) -> Self {
        Self { document }
    }

    pub fn evaluate(&mut self, expr: &Expr) -> DocumentStoreResult<bool> {
        self.visit_expr(expr)
    }

    pub fn filter_documents(
        documents: impl IntoIterator<Item = &'a StoredDocument>,
        expr: &Expr,
    ) -> DocumentStoreResult<Vec<StoredDocument>> {
        let mut matching = Vec::new();

        for document in documents {
            if DocumentEvaluator::new(document).evaluate(expr)? {
                matching.push(document.clone());
            }
        }

        Ok(matching)
    }
}

impl<'a> QueryVisitor for DocumentEvaluator<'a> {
    type Output = bool;
    type Error = DocumentStoreError;

    fn visit_eq(&mut self, field: &str, value: &FieldValue) -> Result<Self::Output, Self::Error> {
        Ok(match self.document.get(field) {
            Some(field_value) => Comparable::from(field_value) == Comparable::from(value),
            None => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campana_core::{query::Filter, value::FieldMap};

    fn document(campaign: impl Into<FieldValue>) -> StoredDocument {
        StoredDocument::new("doc", FieldMap::new()).with_field("campanaID", campaign)
    }

    #[test]
    fn equality_matches_same_string() {
        let expr = Filter::eq("campanaID", "XYZ");

        assert!(DocumentEvaluator::new(&document("XYZ")).evaluate(&expr).unwrap());
        assert!(!DocumentEvaluator::new(&document("xyz")).evaluate(&expr).unwrap());
    }

    #[test]
    fn numeric_kinds_compare_by_value() {
        let expr = Filter::eq("campanaID", 42i64);

        assert!(DocumentEvaluator::new(&document(NativeNumber::Int32(42))).evaluate(&expr).unwrap());
        assert!(DocumentEvaluator::new(&document(42.0)).evaluate(&expr).unwrap());
        assert!(!DocumentEvaluator::new(&document("42")).evaluate(&expr).unwrap());
    }

    #[test]
    fn large_integers_compare_exactly() {
        let expr = Filter::eq("campanaID", 9_007_199_254_740_993i64);

        assert!(DocumentEvaluator::new(&document(9_007_199_254_740_993i64)).evaluate(&expr).unwrap());
        assert!(!DocumentEvaluator::new(&document(9_007_199_254_740_992i64)).evaluate(&expr).unwrap());
        assert!(!DocumentEvaluator::new(&document(NativeNumber::UInt64(9_007_199_254_740_992))).evaluate(&expr).unwrap());
        assert!(DocumentEvaluator::new(&document(NativeNumber::UInt64(9_007_199_254_740_993))).evaluate(&expr).unwrap());
    }

    #[test]
    fn missing_field_never_matches() {
        let expr = Filter::eq("campanaID", FieldValue::Null);
        let bare = StoredDocument::new("doc", FieldMap::new());

        assert!(!DocumentEvaluator::new(&bare).evaluate(&expr).unwrap());
    }
}
