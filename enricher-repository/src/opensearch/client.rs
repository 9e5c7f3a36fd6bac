//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `SearchStore` using
//! the OpenSearch Rust client.

use async_trait::async_trait;
use opensearch::{
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    IndexParts, OpenSearch, SearchParts,
};
use serde_json::Value;
use tracing::{debug, error, info};
use url::Url;

use crate::errors::SearchError;
use crate::interfaces::SearchStore;
use enricher_shared::TargetItem;

/// OpenSearch client implementation.
///
/// Executes enrichment lookups against arbitrary indexes and pushes target
/// items into a single configured target index.
pub struct OpenSearchClient {
    client: OpenSearch,
    target_index: String,
}

impl OpenSearchClient {
    /// Create a new OpenSearch client connected to the specified URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    /// * `target_index` - The index target items are pushed into
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchClient)` - A new client instance
    /// * `Err(SearchError)` - If connection setup fails
    pub fn new(url: &str, target_index: impl Into<String>) -> Result<Self, SearchError> {
        let parsed_url = Url::parse(url).map_err(|e| SearchError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);
        let target_index = target_index.into();

        info!(url = %url, target_index = %target_index, "Created OpenSearch client");

        Ok(Self {
            client,
            target_index,
        })
    }

    /// Extract the first hit's source document from a search response body.
    fn first_hit(body: &Value) -> Option<Value> {
        body["hits"]["hits"]
            .as_array()
            .and_then(|hits| hits.first())
            .map(|hit| hit["_source"].clone())
    }
}

#[async_trait]
impl SearchStore for OpenSearchClient {
    async fn search(&self, index: &str, query: &Value) -> Result<Option<Value>, SearchError> {
        let response = self
            .client
            .search(SearchParts::Index(&[index]))
            .body(query.clone())
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Search request failed");
            return Err(SearchError::query(format!(
                "Search failed with status {}: {}",
                status, error_body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;

        let matched = Self::first_hit(&body);
        debug!(index = %index, matched = matched.is_some(), "Search completed");
        Ok(matched)
    }

    async fn push(&self, item: &TargetItem) -> Result<(), SearchError> {
        let id = item
            .id
            .ok_or_else(|| SearchError::validation("target item has no identifier"))?;
        let doc_id = id.to_string();

        let response = self
            .client
            .index(IndexParts::IndexId(&self.target_index, &doc_id))
            .body(item)
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Index request failed");
            return Err(SearchError::index(format!(
                "Index failed with status {}: {}",
                status, error_body
            )));
        }

        debug!(doc_id = %doc_id, index = %self.target_index, "Target item indexed");
        Ok(())
    }

    async fn health_check(&self) -> Result<bool, SearchError> {
        let response = self
            .client
            .ping()
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        Ok(response.status_code().is_success())
    }
}
