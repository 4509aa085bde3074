//! Query translation from campana expressions to MongoDB filter documents.

use bson::{Document, doc};

use campana_core::{
    error::DocumentStoreError,
    query::QueryVisitor,
    value::FieldValue,
};

use crate::convert::filter_value;

/// Translates query expressions into MongoDB's native BSON filter syntax.
pub(crate) struct MongoQueryTranslator;

impl QueryVisitor for MongoQueryTranslator {
    type Output = Document;
    type Error = DocumentStoreError;

    fn visit_eq(&mut self, field: &str, value: &FieldValue) -> Result<Self::Output, Self::Error> {
        Ok(doc! {
            field: { "$eq": filter_value(value)? },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campana_core::query::Filter;

    #[test]
    fn equality_becomes_an_eq_operator() {
        let filter = MongoQueryTranslator
            .visit_expr(&Filter::eq("campanaID", "XYZ"))
            .unwrap();

        assert_eq!(filter, doc! { "campanaID": { "$eq": "XYZ" } });
    }

    #[test]
    fn unmatchable_values_are_rejected() {
        let result = MongoQueryTranslator.visit_expr(&Filter::eq("campanaID", FieldValue::Map(Default::default())));

        assert!(matches!(result, Err(DocumentStoreError::InvalidQuery(_))));
    }
}
