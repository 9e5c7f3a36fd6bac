//! Domain configuration store.
//!
//! Maps context names to domain configurations. Collection contexts carry a
//! per-business-type index configuration; the target context carries none.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::references::{SourceReference, TargetReference};
use crate::errors::EnrichError;

/// Per-business-type index configuration for a collection context.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexConfig {
    /// Name of the index the substituted query runs against.
    pub index_name: String,
    /// Serialized JSON query template with placeholder field values.
    pub query: String,
    /// Rules for extracting values from the incoming data object.
    #[serde(default)]
    pub source_references: Vec<SourceReference>,
    /// Rules for composing values into the query template.
    #[serde(default)]
    pub target_references: Vec<TargetReference>,
}

/// Configuration for a collection-style context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionDomainConfig {
    /// Index configurations keyed by business type.
    pub indexes: HashMap<String, IndexConfig>,
}

impl CollectionDomainConfig {
    /// Resolve the index configuration for a business type.
    pub fn index_config(&self, business_type: &str) -> Option<&IndexConfig> {
        self.indexes.get(business_type)
    }
}

/// Domain configuration variants keyed by context.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DomainConfig {
    /// A collection context: lookup, substitute, search, transform, merge.
    Collection(CollectionDomainConfig),
    /// The target context: hash and index each item directly.
    Target,
}

/// Immutable lookup structure for domain configurations.
///
/// Built once at startup and shared by reference across all requests;
/// never mutated after initialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainConfigStore {
    contexts: HashMap<String, DomainConfig>,
}

impl DomainConfigStore {
    /// Create a store from an already-built context map.
    pub fn new(contexts: HashMap<String, DomainConfig>) -> Self {
        Self { contexts }
    }

    /// Parse a store from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, EnrichError> {
        serde_json::from_str(json).map_err(|e| EnrichError::config(e.to_string()))
    }

    /// Load a store from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, EnrichError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            EnrichError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let store = Self::from_json(&contents)?;
        info!(
            path = %path.display(),
            contexts = store.contexts.len(),
            "Loaded domain configuration"
        );
        Ok(store)
    }

    /// Resolve the domain configuration for a context name.
    pub fn configuration(&self, context: &str) -> Option<&DomainConfig> {
        self.contexts.get(context)
    }
}
