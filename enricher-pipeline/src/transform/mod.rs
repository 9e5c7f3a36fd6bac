//! Record transformer boundary.
//!
//! The schema-mapping logic itself lives outside this component; the
//! orchestrator only needs the narrow contract below.

use serde_json::Value;

use crate::errors::EnrichError;

/// Maps a raw search result into the shape expected by the outgoing
/// enriched record, given a business-type discriminator.
pub trait RecordTransformer: Send + Sync {
    /// Transform a matched record for the given business type.
    fn transform(&self, record: &Value, business_type: &str) -> Result<Value, EnrichError>;
}

/// Transformer that returns the matched record unchanged.
///
/// Useful for wiring and tests, and for deployments where the search
/// result already has the outgoing shape.
pub struct PassthroughTransformer;

impl RecordTransformer for PassthroughTransformer {
    fn transform(&self, record: &Value, _business_type: &str) -> Result<Value, EnrichError> {
        Ok(record.clone())
    }
}
