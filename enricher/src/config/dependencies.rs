//! Dependency initialization and wiring for the enricher.

use std::env;
use std::sync::Arc;
use tracing::info;

use crate::EnricherError;
use enricher_pipeline::{
    config::DomainConfigStore,
    transform::{PassthroughTransformer, RecordTransformer},
    EnrichmentService,
};
use enricher_repository::{OpenSearchClient, SearchStore};

/// Default OpenSearch URL.
const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Default path of the domain configuration document.
const DEFAULT_DOMAIN_CONFIG_PATH: &str = "config/domain-config.json";

/// Default index target items are pushed into.
const DEFAULT_TARGET_INDEX: &str = "target-data";

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured enrichment service ready to take records.
    pub service: EnrichmentService,
}

impl std::fmt::Debug for Dependencies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dependencies").finish_non_exhaustive()
    }
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200)
    /// - `DOMAIN_CONFIG_PATH`: Path to the domain configuration JSON
    ///   (default: config/domain-config.json)
    /// - `TARGET_INDEX_NAME`: Index for target items (default: target-data)
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(EnricherError)` - If initialization fails
    pub async fn new() -> Result<Self, EnricherError> {
        let opensearch_url =
            env::var("OPENSEARCH_URL").unwrap_or_else(|_| DEFAULT_OPENSEARCH_URL.to_string());
        let config_path = env::var("DOMAIN_CONFIG_PATH")
            .unwrap_or_else(|_| DEFAULT_DOMAIN_CONFIG_PATH.to_string());
        let target_index =
            env::var("TARGET_INDEX_NAME").unwrap_or_else(|_| DEFAULT_TARGET_INDEX.to_string());

        info!(
            opensearch_url = %opensearch_url,
            config_path = %config_path,
            target_index = %target_index,
            "Initializing dependencies"
        );

        // Domain configuration is loaded once and shared read-only.
        let configs = Arc::new(DomainConfigStore::from_file(&config_path)?);

        // Initialize the search store
        let search_client = OpenSearchClient::new(&opensearch_url, target_index)
            .map_err(|e| EnricherError::config(format!("Failed to create OpenSearch client: {}", e)))?;

        // Verify the backend is reachable
        let healthy = search_client
            .health_check()
            .await
            .map_err(|e| EnricherError::config(format!("OpenSearch health check failed: {}", e)))?;

        if !healthy {
            return Err(EnricherError::config("OpenSearch cluster is unhealthy"));
        }

        info!("OpenSearch connection verified");

        let transformer: Arc<dyn RecordTransformer> = Arc::new(PassthroughTransformer);

        let service = EnrichmentService::new(configs, Arc::new(search_client), transformer);

        Ok(Self { service })
    }
}
