use async_trait::async_trait;
use bson::{Document, doc};
use futures::TryStreamExt;
use mongodb::{Client, Collection as MongoCollection, options::ClientOptions};

use campana_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    document::StoredDocument,
    error::{DocumentStoreError, DocumentStoreResult},
    query::{Query, QueryVisitor},
};

use crate::{convert::stored_document, credentials::StoreCredentials, query::MongoQueryTranslator};

const DEFAULT_APP_NAME: &str = "campana";

/// Read-only [`StoreBackend`] over a MongoDB database.
///
/// The client pools connections internally and is cheap to share; create one store at
/// startup and reuse it for every request.
#[derive(Debug)]
pub struct MongoDbStore {
    client: Client,
    database: String,
}

impl MongoDbStore {
    pub fn new(client: Client, database: String) -> Self {
        Self { client, database }
    }

    pub fn builder(dsn: &str, database: &str) -> MongoDbStoreBuilder {
        MongoDbStoreBuilder::new(dsn, database)
    }

    /// Creates a builder from a decoded credential document.
    pub fn from_credentials(credentials: &StoreCredentials) -> MongoDbStoreBuilder {
        let builder = MongoDbStoreBuilder::new(&credentials.uri, &credentials.database);

        match &credentials.app_name {
            Some(app_name) => builder.app_name(app_name),
            None => builder,
        }
    }

    fn get_collection(&self, collection_name: &str) -> MongoCollection<Document> {
        self.client
            .database(&self.database)
            .collection(collection_name)
    }
}

#[async_trait]
impl StoreBackend for MongoDbStore {
    async fn query_documents(&self, query: Query, collection: &str) -> DocumentStoreResult<Vec<StoredDocument>> {
        let filter = match &query.filter {
            Some(expr) => MongoQueryTranslator.visit_expr(expr)?,
            None => doc! {},
        };

        tracing::trace!(collection, %filter, "Running MongoDB find");

        self.get_collection(collection)
            .find(filter)
            .await
            .map_err(|e| DocumentStoreError::Backend(e.to_string()))?
            .try_collect::<Vec<Document>>()
            .await
            .map_err(|e| DocumentStoreError::Backend(e.to_string()))?
            .into_iter()
            .map(stored_document)
            .collect()
    }
}

pub struct MongoDbStoreBuilder {
    dsn: String,
    database: String,
    app_name: String,
}

impl MongoDbStoreBuilder {
    pub fn new(dsn: &str, database: &str) -> Self {
        Self {
            dsn: dsn.to_string(),
            database: database.to_string(),
            app_name: DEFAULT_APP_NAME.to_string(),
        }
    }

    /// Overrides the application name reported in the connection handshake.
    pub fn app_name(mut self, app_name: &str) -> Self {
        self.app_name = app_name.to_string();
        self
    }
}

#[async_trait]
impl StoreBackendBuilder for MongoDbStoreBuilder {
    type Backend = MongoDbStore;

    async fn build(self) -> DocumentStoreResult<Self::Backend> {
        let mut options = ClientOptions::parse(&self.dsn)
            .await
            .map_err(|e| DocumentStoreError::Initialization(e.to_string()))?;
        options.app_name = Some(self.app_name);

        Ok(MongoDbStore::new(
            Client::with_options(options)
                .map_err(|e| DocumentStoreError::Initialization(e.to_string()))?,
            self.database,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_carry_the_app_name_into_the_builder() {
        let credentials = StoreCredentials {
            uri: "mongodb://localhost:27017".to_string(),
            database: "monitoreo".to_string(),
            app_name: Some("monitoreo-api".to_string()),
        };

        let builder = MongoDbStore::from_credentials(&credentials);

        assert_eq!(builder.dsn, "mongodb://localhost:27017");
        assert_eq!(builder.database, "monitoreo");
        assert_eq!(builder.app_name, "monitoreo-api");
        assert_eq!(MongoDbStore::builder("mongodb://x", "db").app_name, DEFAULT_APP_NAME);
    }

    #[tokio::test]
    async fn malformed_connection_strings_fail_to_build() {
        let result = MongoDbStore::builder("not-a-uri", "db").build().await;

        assert!(matches!(result, Err(DocumentStoreError::Initialization(_))));
    }
}
