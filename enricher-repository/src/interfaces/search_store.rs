//! Search store trait definition.
//!
//! This module defines the abstract interface for search backend operations,
//! allowing for different implementations (OpenSearch, Elasticsearch, etc.).

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::SearchError;
use enricher_shared::TargetItem;

/// Abstract interface for search backend operations.
///
/// The enrichment step needs exactly two things from the backend: execute a
/// fully substituted query against a named index and pull back at most one
/// matched record, and push a target item into the configured target index.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to allow use across async tasks.
#[async_trait]
pub trait SearchStore: Send + Sync {
    /// Execute a query against the named index.
    ///
    /// # Arguments
    ///
    /// * `index` - The index to query
    /// * `query` - The fully substituted query body
    ///
    /// # Returns
    ///
    /// * `Ok(Some(record))` - The first matched record's source document
    /// * `Ok(None)` - The query matched nothing
    /// * `Err(SearchError)` - If the search fails
    async fn search(&self, index: &str, query: &Value) -> Result<Option<Value>, SearchError>;

    /// Index a target item.
    ///
    /// The item's identifier must already be computed; implementations use
    /// it as the document id so re-pushing the same item is idempotent.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the item was indexed successfully
    /// * `Err(SearchError)` - On backend rejection or a missing identifier
    async fn push(&self, item: &TargetItem) -> Result<(), SearchError>;

    /// Check if the search backend is healthy and reachable.
    async fn health_check(&self) -> Result<bool, SearchError>;
}
