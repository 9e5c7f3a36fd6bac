//! Orchestrator module for the enricher pipeline.
//!
//! Coordinates the config store, templater, search store, and transformer
//! for collection contexts, and the identity hasher and indexer for the
//! target context.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, info, instrument};

use crate::config::{CollectionDomainConfig, DomainConfig, DomainConfigStore};
use crate::errors::EnrichError;
use crate::identity;
use crate::templater::{self, find_value};
use crate::transform::RecordTransformer;
use enricher_repository::SearchStore;
use enricher_shared::{IncomingRecord, TargetItem};

/// Field holding the business-type discriminator inside the data object.
const BUSINESS_SERVICE_FIELD: &str = "businessService";

/// Explicit per-record outcome of an enrichment attempt.
///
/// Errors are caught at the orchestrator boundary and logged; the caller
/// always gets the record back, with the status telling success from a
/// silently skipped enrichment.
#[derive(Debug, Clone, PartialEq)]
pub enum EnrichmentStatus {
    /// The merge key was populated from the transformer's output.
    Enriched {
        /// Business type the lookup ran under.
        business_type: String,
    },
    /// The enrichment attempt failed; the record is unmodified.
    Skipped {
        /// Business type, when it could be extracted before the failure.
        business_type: Option<String>,
        /// The error that aborted the attempt.
        reason: EnrichError,
    },
    /// Target items were hashed and indexed.
    Indexed {
        /// Number of items in the data object.
        total: usize,
        /// Items indexed successfully.
        succeeded: usize,
        /// Per-item failures, by position in the sequence.
        failures: Vec<(usize, EnrichError)>,
    },
    /// No domain configuration applied to the record's context.
    Passthrough,
}

/// Result of one `enrich` call: the (possibly enriched) record plus its
/// explicit status.
#[derive(Debug, Clone)]
pub struct EnrichmentOutcome {
    /// The record, enriched when the status says so.
    pub record: IncomingRecord,
    /// What happened to the record.
    pub status: EnrichmentStatus,
}

/// Service that enriches incoming records.
///
/// Holds read-only configuration and the two collaborator boundaries; owns
/// no other state, so a single instance serves concurrent requests.
pub struct EnrichmentService {
    configs: Arc<DomainConfigStore>,
    store: Arc<dyn SearchStore>,
    transformer: Arc<dyn RecordTransformer>,
}

impl EnrichmentService {
    /// Create a new enrichment service.
    pub fn new(
        configs: Arc<DomainConfigStore>,
        store: Arc<dyn SearchStore>,
        transformer: Arc<dyn RecordTransformer>,
    ) -> Self {
        Self {
            configs,
            store,
            transformer,
        }
    }

    /// Enrich a single incoming record.
    ///
    /// For a collection context, the data object's business type selects an
    /// index configuration, the templated query is substituted and executed,
    /// and the transformed match is merged under the record's merge key. For
    /// the target context, each item of the data object is hashed and
    /// indexed independently.
    ///
    /// Never fails: per-record and per-item errors are logged and surfaced
    /// through the returned status, and the record comes back unmodified on
    /// failure.
    #[instrument(skip(self, record), fields(context = %record.data_context))]
    pub async fn enrich(&self, mut record: IncomingRecord) -> EnrichmentOutcome {
        let mut status = EnrichmentStatus::Passthrough;

        if let Some(DomainConfig::Collection(collection)) =
            self.configs.configuration(&record.data_context)
        {
            status = match self.enrich_collection(collection, &record.data_object).await {
                Ok((business_type, transformed)) => {
                    record.domain_object = Some(transformed);
                    info!(business_type = %business_type, "Record enriched");
                    EnrichmentStatus::Enriched { business_type }
                }
                Err((business_type, reason)) => {
                    error!(
                        business_type = business_type.as_deref().unwrap_or("unknown"),
                        error = %reason,
                        "Enrichment failed; returning record unmodified"
                    );
                    EnrichmentStatus::Skipped {
                        business_type,
                        reason,
                    }
                }
            };
        }

        // The target branch runs independently of the collection branch,
        // keyed on the context name alone.
        if record.is_target_context() {
            status = self.index_target_items(&record.data_object).await;
        }

        EnrichmentOutcome { record, status }
    }

    /// Run the collection branch: lookup, substitute, search, transform.
    ///
    /// Returns the business type alongside the error so failures can be
    /// logged with their contextual identifier.
    async fn enrich_collection(
        &self,
        collection: &CollectionDomainConfig,
        data_object: &Value,
    ) -> Result<(String, Value), (Option<String>, EnrichError)> {
        let business_type = find_value(data_object, BUSINESS_SERVICE_FIELD)
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| (None, EnrichError::missing_field(BUSINESS_SERVICE_FIELD)))?;

        let result = self
            .lookup_and_transform(collection, &business_type, data_object)
            .await;

        match result {
            Ok(transformed) => Ok((business_type, transformed)),
            Err(e) => Err((Some(business_type), e)),
        }
    }

    async fn lookup_and_transform(
        &self,
        collection: &CollectionDomainConfig,
        business_type: &str,
        data_object: &Value,
    ) -> Result<Value, EnrichError> {
        let index_config = collection
            .index_config(business_type)
            .ok_or_else(|| EnrichError::unknown_business_type(business_type))?;

        let query = templater::substitute(index_config, data_object)?;
        debug!(index = %index_config.index_name, query = %query, "Substituted query");

        let matched = self
            .store
            .search(&index_config.index_name, &query)
            .await?
            .ok_or_else(|| EnrichError::NoMatch {
                index: index_config.index_name.clone(),
                business_type: business_type.to_owned(),
            })?;

        self.transformer.transform(&matched, business_type)
    }

    /// Run the target branch: hash and index every item of the sequence.
    ///
    /// A failure on one item is recorded and does not stop processing of
    /// subsequent items.
    async fn index_target_items(&self, data_object: &Value) -> EnrichmentStatus {
        let items = match data_object.as_array() {
            Some(items) => items,
            None => {
                let reason = EnrichError::invalid_item("target data object is not a sequence");
                error!(error = %reason, "Target indexing aborted");
                return EnrichmentStatus::Skipped {
                    business_type: None,
                    reason,
                };
            }
        };

        let mut succeeded = 0;
        let mut failures = Vec::new();

        for (position, raw) in items.iter().enumerate() {
            match self.index_target_item(raw).await {
                Ok(id) => {
                    debug!(position, id, "Target item indexed");
                    succeeded += 1;
                }
                Err(e) => {
                    error!(position, error = %e, "Failed to index target item");
                    failures.push((position, e));
                }
            }
        }

        info!(
            total = items.len(),
            succeeded,
            failed = failures.len(),
            "Target items processed"
        );

        EnrichmentStatus::Indexed {
            total: items.len(),
            succeeded,
            failures,
        }
    }

    async fn index_target_item(&self, raw: &Value) -> Result<i32, EnrichError> {
        let mut item: TargetItem = serde_json::from_value(raw.clone())
            .map_err(|e| EnrichError::invalid_item(e.to_string()))?;

        let id = identity::identify(&item);
        item.id = Some(id);

        self.store.push(&item).await?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use enricher_repository::SearchError;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use crate::transform::PassthroughTransformer;

    /// Mock search store for testing.
    struct MockSearchStore {
        search_count: AtomicUsize,
        search_result: Option<Value>,
        pushed: Mutex<Vec<TargetItem>>,
        /// Entity name whose push is rejected, to exercise per-item isolation.
        reject_entity: Option<String>,
    }

    impl MockSearchStore {
        fn with_match(result: Value) -> Self {
            Self {
                search_count: AtomicUsize::new(0),
                search_result: Some(result),
                pushed: Mutex::new(Vec::new()),
                reject_entity: None,
            }
        }

        fn without_match() -> Self {
            Self {
                search_count: AtomicUsize::new(0),
                search_result: None,
                pushed: Mutex::new(Vec::new()),
                reject_entity: None,
            }
        }

        fn rejecting(entity_name: &str) -> Self {
            Self {
                reject_entity: Some(entity_name.to_owned()),
                ..Self::without_match()
            }
        }
    }

    #[async_trait]
    impl SearchStore for MockSearchStore {
        async fn search(&self, _index: &str, _query: &Value) -> Result<Option<Value>, SearchError> {
            self.search_count.fetch_add(1, Ordering::SeqCst);
            Ok(self.search_result.clone())
        }

        async fn push(&self, item: &TargetItem) -> Result<(), SearchError> {
            if self.reject_entity.as_deref() == Some(item.entity_name.as_str()) {
                return Err(SearchError::index("backend rejected document"));
            }
            self.pushed.lock().unwrap().push(item.clone());
            Ok(())
        }

        async fn health_check(&self) -> Result<bool, SearchError> {
            Ok(true)
        }
    }

    fn config_store() -> Arc<DomainConfigStore> {
        let json = r#"{
            "contexts": {
                "collections": {
                    "type": "collection",
                    "indexes": {
                        "WATER": {
                            "indexName": "water-services",
                            "query": "{\"query\":{\"term\":{\"refKey\":\"placeholder\"}}}",
                            "sourceReferences": [
                                { "fieldName": "period", "expression": "FY_SVC", "separator": "_" }
                            ],
                            "targetReferences": [
                                { "argument": "refKey", "expression": "FY_SVC", "separator": "_" }
                            ]
                        }
                    }
                },
                "target": { "type": "target" }
            }
        }"#;
        Arc::new(DomainConfigStore::from_json(json).unwrap())
    }

    fn service(store: Arc<MockSearchStore>) -> EnrichmentService {
        EnrichmentService::new(config_store(), store, Arc::new(PassthroughTransformer))
    }

    #[tokio::test]
    async fn test_collection_context_populates_merge_key() {
        let store = Arc::new(MockSearchStore::with_match(json!({ "totalAmount": 1200 })));
        let svc = service(store.clone());

        let record = IncomingRecord::new(
            "collections",
            json!({ "businessService": "WATER", "period": "2023-24_WATER" }),
        );

        let outcome = svc.enrich(record).await;
        assert_eq!(
            outcome.status,
            EnrichmentStatus::Enriched {
                business_type: "WATER".to_owned()
            }
        );
        assert_eq!(
            outcome.record.domain_object,
            Some(json!({ "totalAmount": 1200 }))
        );
        assert_eq!(store.search_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unknown_business_type_skips_without_failing() {
        let store = Arc::new(MockSearchStore::with_match(json!({})));
        let svc = service(store.clone());

        let record = IncomingRecord::new(
            "collections",
            json!({ "businessService": "TRADE", "period": "2023-24_TRADE" }),
        );
        let original_data = record.data_object.clone();

        let outcome = svc.enrich(record).await;
        assert_eq!(
            outcome.status,
            EnrichmentStatus::Skipped {
                business_type: Some("TRADE".to_owned()),
                reason: EnrichError::unknown_business_type("TRADE"),
            }
        );
        assert!(outcome.record.domain_object.is_none());
        assert_eq!(outcome.record.data_object, original_data);
        assert_eq!(store.search_count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_business_type_skips_without_failing() {
        let store = Arc::new(MockSearchStore::with_match(json!({})));
        let svc = service(store);

        let record = IncomingRecord::new("collections", json!({ "period": "2023-24_WATER" }));
        let outcome = svc.enrich(record).await;

        assert_eq!(
            outcome.status,
            EnrichmentStatus::Skipped {
                business_type: None,
                reason: EnrichError::missing_field(BUSINESS_SERVICE_FIELD),
            }
        );
        assert!(outcome.record.domain_object.is_none());
    }

    #[tokio::test]
    async fn test_token_count_mismatch_skips_without_panicking() {
        let store = Arc::new(MockSearchStore::with_match(json!({})));
        let svc = service(store);

        // period has one token where the expression expects two.
        let record = IncomingRecord::new(
            "collections",
            json!({ "businessService": "WATER", "period": "2023-24" }),
        );

        let outcome = svc.enrich(record).await;
        match outcome.status {
            EnrichmentStatus::Skipped { reason, .. } => {
                assert!(matches!(reason, EnrichError::TokenCountMismatch { .. }));
            }
            other => panic!("expected skip, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_no_match_skips_enrichment() {
        let store = Arc::new(MockSearchStore::without_match());
        let svc = service(store);

        let record = IncomingRecord::new(
            "collections",
            json!({ "businessService": "WATER", "period": "2023-24_WATER" }),
        );

        let outcome = svc.enrich(record).await;
        match outcome.status {
            EnrichmentStatus::Skipped { reason, .. } => {
                assert!(matches!(reason, EnrichError::NoMatch { .. }));
            }
            other => panic!("expected skip, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unknown_context_passes_through() {
        let store = Arc::new(MockSearchStore::without_match());
        let svc = service(store);

        let record = IncomingRecord::new("unknown", json!({ "businessService": "WATER" }));
        let outcome = svc.enrich(record).await;

        assert_eq!(outcome.status, EnrichmentStatus::Passthrough);
    }

    #[tokio::test]
    async fn test_target_items_are_hashed_and_pushed() {
        let store = Arc::new(MockSearchStore::without_match());
        let svc = service(store.clone());

        let record = IncomingRecord::new(
            "Target",
            json!([
                { "financialYear": "2023-24", "businessService": "Water Supply", "entityName": "CityA" },
                { "financialYear": "2023-24", "businessService": "Trade License", "entityName": "CityB" }
            ]),
        );

        let outcome = svc.enrich(record).await;
        assert_eq!(
            outcome.status,
            EnrichmentStatus::Indexed {
                total: 2,
                succeeded: 2,
                failures: vec![],
            }
        );

        let pushed = store.pushed.lock().unwrap();
        assert_eq!(pushed.len(), 2);
        assert!(pushed.iter().all(|item| item.id.is_some()));

        // Identifier matches the hasher, not anything supplied externally.
        let expected = identity::identify(&TargetItem::new("2023-24", "Water Supply", "CityA"));
        assert_eq!(pushed[0].id, Some(expected));
    }

    #[tokio::test]
    async fn test_failing_target_item_does_not_stop_the_rest() {
        let store = Arc::new(MockSearchStore::rejecting("CityB"));
        let svc = service(store.clone());

        let record = IncomingRecord::new(
            "target",
            json!([
                { "financialYear": "2023-24", "businessService": "PT", "entityName": "CityA" },
                { "financialYear": "2023-24", "businessService": "PT", "entityName": "CityB" },
                { "financialYear": "2023-24", "businessService": "PT", "entityName": "CityC" }
            ]),
        );

        let outcome = svc.enrich(record).await;
        match outcome.status {
            EnrichmentStatus::Indexed {
                total,
                succeeded,
                failures,
            } => {
                assert_eq!(total, 3);
                assert_eq!(succeeded, 2);
                assert_eq!(failures.len(), 1);
                assert_eq!(failures[0].0, 1);
            }
            other => panic!("expected indexed status, got {:?}", other),
        }

        let pushed = store.pushed.lock().unwrap();
        assert_eq!(pushed.len(), 2);
        assert_eq!(pushed[1].entity_name, "CityC");
    }

    #[tokio::test]
    async fn test_malformed_target_item_is_isolated() {
        let store = Arc::new(MockSearchStore::without_match());
        let svc = service(store.clone());

        let record = IncomingRecord::new(
            "target",
            json!([
                { "financialYear": "2023-24" },
                { "financialYear": "2023-24", "businessService": "PT", "entityName": "CityA" }
            ]),
        );

        let outcome = svc.enrich(record).await;
        match outcome.status {
            EnrichmentStatus::Indexed {
                succeeded,
                failures,
                ..
            } => {
                assert_eq!(succeeded, 1);
                assert!(matches!(failures[0].1, EnrichError::InvalidItem(_)));
            }
            other => panic!("expected indexed status, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_sequence_target_data_is_skipped() {
        let store = Arc::new(MockSearchStore::without_match());
        let svc = service(store);

        let record = IncomingRecord::new("target", json!({ "not": "a sequence" }));
        let outcome = svc.enrich(record).await;

        match outcome.status {
            EnrichmentStatus::Skipped { reason, .. } => {
                assert!(matches!(reason, EnrichError::InvalidItem(_)));
            }
            other => panic!("expected skip, got {:?}", other),
        }
    }
}
