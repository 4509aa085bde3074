//! Campaign-filtered fetches over the registered collections.

use std::sync::Arc;

use crate::{
    backend::StoreBackend,
    collection::{Collection, CollectionKey},
    document::NormalizedDocument,
    error::DocumentStoreResult,
};

/// Reads registered collections filtered by campaign and returns normalized documents.
///
/// The service holds the process-wide backend handle it was built with; cloning the
/// service shares that handle.
#[derive(Debug, Clone)]
pub struct CollectionQueryService {
    backend: Arc<dyn StoreBackend>,
}

impl CollectionQueryService {
    pub fn new(backend: Arc<dyn StoreBackend>) -> Self {
        Self { backend }
    }

    pub fn collection(&self, key: CollectionKey) -> Collection<'_> {
        Collection::new(key, self.backend.as_ref())
    }

    /// Returns every document of `key` whose filter field equals `campaign_id`.
    ///
    /// Enclosing double quotes around `campaign_id` are dropped before querying. An empty
    /// result is returned as-is; deciding that it means "not found" is up to the caller.
    pub async fn fetch(
        &self,
        key: CollectionKey,
        campaign_id: &str,
    ) -> DocumentStoreResult<Vec<NormalizedDocument>> {
        let campaign_id = trim_campaign_id(campaign_id);
        let collection = self.collection(key);

        tracing::debug!(
            collection = collection.name(),
            filter_field = collection.config().filter_field,
            campaign_id,
            "fetching documents"
        );

        let documents = collection
            .find_by_filter_value(campaign_id)
            .await?
            .into_iter()
            .map(NormalizedDocument::from)
            .collect::<Vec<_>>();

        tracing::info!(
            collection = collection.name(),
            campaign_id,
            count = documents.len(),
            "fetched documents"
        );

        Ok(documents)
    }
}

/// Strips the double quotes some callers wrap identifiers in.
pub fn trim_campaign_id(raw: &str) -> &str {
    raw.trim_matches('"')
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use std::sync::Mutex;

    use crate::{
        document::StoredDocument,
        error::DocumentStoreError,
        query::{Expr, Query},
        value::{FieldMap, FieldValue},
    };

    /// Returns canned documents and remembers what it was asked.
    #[derive(Debug, Default)]
    struct RecordingBackend {
        documents: Vec<StoredDocument>,
        fail: bool,
        calls: Mutex<Vec<(Query, String)>>,
    }

    #[async_trait]
    impl StoreBackend for RecordingBackend {
        async fn query_documents(
            &self,
            query: Query,
            collection: &str,
        ) -> DocumentStoreResult<Vec<StoredDocument>> {
            self.calls
                .lock()
                .unwrap()
                .push((query, collection.to_string()));

            if self.fail {
                return Err(DocumentStoreError::Backend("connection reset".to_string()));
            }

            Ok(self.documents.clone())
        }
    }

    fn service(backend: &Arc<RecordingBackend>) -> CollectionQueryService {
        CollectionQueryService::new(backend.clone())
    }

    fn last_call(backend: &RecordingBackend) -> (Query, String) {
        backend
            .calls
            .lock()
            .unwrap()
            .last()
            .cloned()
            .unwrap()
    }

    #[test]
    fn quotes_are_trimmed() {
        assert_eq!(trim_campaign_id("\"abc\""), "abc");
        assert_eq!(trim_campaign_id("abc"), "abc");
        assert_eq!(trim_campaign_id("\"\"abc\""), "abc");
        assert_eq!(trim_campaign_id("a\"b"), "a\"b");
    }

    #[tokio::test]
    async fn fetch_filters_on_the_configured_field() {
        let backend = Arc::new(RecordingBackend::default());

        service(&backend)
            .fetch(CollectionKey::Estacion, "\"XYZ\"")
            .await
            .unwrap();

        let (query, collection) = last_call(&backend);
        assert_eq!(collection, "Estacion");
        assert_eq!(
            query.filter,
            Some(Expr::Eq {
                field: "campanaID".to_string(),
                value: FieldValue::from("XYZ"),
            })
        );
    }

    #[tokio::test]
    async fn quoted_and_bare_ids_query_the_same_value() {
        let backend = Arc::new(RecordingBackend::default());
        let service = service(&backend);

        service.fetch(CollectionKey::Campana, "\"abc\"").await.unwrap();
        let quoted = last_call(&backend);
        service.fetch(CollectionKey::Campana, "abc").await.unwrap();
        let bare = last_call(&backend);

        assert_eq!(quoted, bare);
    }

    #[tokio::test]
    async fn fetch_normalizes_documents_and_injects_ids() {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 15, 30, 0).unwrap();
        let backend = Arc::new(RecordingBackend {
            documents: vec![
                StoredDocument::new("doc-1", FieldMap::new())
                    .with_field("campanaID", "XYZ")
                    .with_field("nombre", "Test")
                    .with_field("creado", created),
            ],
            ..Default::default()
        });

        let documents = service(&backend)
            .fetch(CollectionKey::Campana, "XYZ")
            .await
            .unwrap();

        assert_eq!(documents.len(), 1);
        assert_eq!(
            serde_json::to_value(&documents[0]).unwrap(),
            json!({
                "id": "doc-1",
                "campanaID": "XYZ",
                "nombre": "Test",
                "creado": "2024-03-01T12:30:00-03:00"
            })
        );
    }

    #[tokio::test]
    async fn empty_result_is_not_an_error() {
        let backend = Arc::new(RecordingBackend::default());

        let documents = service(&backend)
            .fetch(CollectionKey::Campana, "nothing")
            .await
            .unwrap();

        assert!(documents.is_empty());
    }

    #[tokio::test]
    async fn backend_errors_propagate() {
        let backend = Arc::new(RecordingBackend {
            fail: true,
            ..Default::default()
        });

        let result = service(&backend)
            .fetch(CollectionKey::Campana, "XYZ")
            .await;

        assert!(matches!(result, Err(DocumentStoreError::Backend(_))));
        assert_eq!(backend.calls.lock().unwrap().len(), 1);
    }
}
