//! Legacy REST push path.
//!
//! Deprecated alternate interface kept for parity with older deployments:
//! it builds an index path from the index name, the document type, and a
//! millisecond timestamp, authenticates with Basic credentials, and posts
//! the document over the raw transport. The main orchestration path does
//! not use it; new integrations should go through [`SearchStore::push`].
//!
//! [`SearchStore::push`]: crate::interfaces::SearchStore::push

use chrono::Utc;
use opensearch::auth::Credentials;
use opensearch::http::request::JsonBody;
use opensearch::http::transport::{SingleNodeConnectionPool, Transport, TransportBuilder};
use opensearch::http::{headers::HeaderMap, Method};
use serde_json::Value;
use tracing::{error, info};
use url::Url;

use crate::errors::SearchError;

/// Legacy REST indexer with Basic authentication.
///
/// Each pushed document is stored under a fresh millisecond-timestamp id,
/// so repeated pushes of the same document create new documents. This is
/// the historical behavior and one of the reasons the path is deprecated.
pub struct LegacyRestIndexer {
    transport: Transport,
    index_name: String,
    document_type: String,
}

impl LegacyRestIndexer {
    /// Create a new legacy indexer.
    ///
    /// # Arguments
    ///
    /// * `host` - The index service host URL
    /// * `username` / `password` - Basic auth credentials
    /// * `index_name` - The index documents are pushed into
    /// * `document_type` - The document type segment of the index path
    pub fn new(
        host: &str,
        username: &str,
        password: &str,
        index_name: impl Into<String>,
        document_type: impl Into<String>,
    ) -> Result<Self, SearchError> {
        let url = Url::parse(host).map_err(|e| SearchError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(url);
        let transport = TransportBuilder::new(conn_pool)
            .auth(Credentials::Basic(username.into(), password.into()))
            .disable_proxy()
            .build()
            .map_err(|e| SearchError::connection(e.to_string()))?;

        Ok(Self {
            transport,
            index_name: index_name.into(),
            document_type: document_type.into(),
        })
    }

    /// Build the document path for the given millisecond timestamp.
    fn document_path(&self, timestamp_millis: i64) -> String {
        format!(
            "{}/{}/{}",
            self.index_name, self.document_type, timestamp_millis
        )
    }

    /// Push a document into the legacy index.
    pub async fn push(&self, document: &Value) -> Result<(), SearchError> {
        let path = self.document_path(Utc::now().timestamp_millis());
        info!(path = %path, "Pushing document via legacy REST path");

        let response = self
            .transport
            .send(
                Method::Post,
                &path,
                HeaderMap::new(),
                Option::<&()>::None,
                Some(JsonBody::new(document.clone())),
                None,
            )
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Legacy push failed");
            return Err(SearchError::index(format!(
                "Legacy push failed with status {}: {}",
                status, error_body
            )));
        }

        Ok(())
    }
}
