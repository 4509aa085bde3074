//! Query construction for document stores.
//!
//! Queries are built with [`Query::builder`] and a filter expression from [`Filter`]:
//!
//! ```ignore
//! use campana_core::query::{Query, Filter};
//!
//! let query = Query::builder()
//!     .filter(Filter::eq("campanaID", "XYZ"))
//!     .build();
//! ```
//!
//! Backends translate or evaluate expressions by implementing [`QueryVisitor`].

use crate::{error::DocumentStoreError, value::FieldValue};

/// A filter expression for querying documents.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Matches documents whose field equals the value.
    Eq {
        /// The field name to compare.
        field: String,
        /// The value to compare against.
        value: FieldValue,
    },
}

/// A structured query for retrieving documents.
///
/// Without a filter every document of the collection matches. There is no limit:
/// backends return the whole matching set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    /// Optional filter expression to match documents.
    pub filter: Option<Expr>,
}

impl Query {
    /// Creates a new query matching every document.
    pub fn new() -> Self {
        Query { filter: None }
    }

    /// Creates a new query builder for fluent construction.
    pub fn builder() -> QueryBuilder {
        QueryBuilder::new()
    }
}

/// Helper struct for constructing filter expressions.
pub struct Filter;

impl Filter {
    /// Creates an equality filter expression.
    ///
    /// Matches documents where the field equals the specified value.
    pub fn eq(field: impl Into<String>, value: impl Into<FieldValue>) -> Expr {
        Expr::Eq {
            field: field.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    query: Query,
}

impl QueryBuilder {
    /// Creates a new query builder.
    pub fn new() -> Self {
        QueryBuilder { query: Query::default() }
    }

    /// Sets the filter expression for this query.
    pub fn filter(mut self, filter: Expr) -> Self {
        self.query.filter = Some(filter);
        self
    }

    /// Builds and returns the final query.
    pub fn build(self) -> Query {
        self.query
    }
}

pub trait QueryVisitor {
    type Output;
    type Error: Into<DocumentStoreError>;

    fn visit_eq(&mut self, field: &str, value: &FieldValue) -> Result<Self::Output, Self::Error>;

    fn visit_expr(&mut self, expr: &Expr) -> Result<Self::Output, Self::Error> {
        match expr {
            Expr::Eq { field, value } => self.visit_eq(field, value),
        }
    }
}
