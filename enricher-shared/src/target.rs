//! Target data item type.
//!
//! Items under the target context are indexed directly after a stable
//! identifier has been derived from their business attributes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single item from the target context's data sequence.
///
/// The `id` is always computed by the enricher (see the identity hasher in
/// the pipeline crate); an externally supplied value is overwritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetItem {
    /// Financial year the item belongs to (e.g. "2023-24").
    pub financial_year: String,
    /// Business service the item was recorded under.
    pub business_service: String,
    /// Name of the entity the item refers to.
    pub entity_name: String,
    /// Derived 32-bit identifier. Computed, never supplied externally.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    /// Any additional attributes, preserved as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TargetItem {
    /// Create a new item from its three business attributes.
    pub fn new(
        financial_year: impl Into<String>,
        business_service: impl Into<String>,
        entity_name: impl Into<String>,
    ) -> Self {
        Self {
            financial_year: financial_year.into(),
            business_service: business_service.into(),
            entity_name: entity_name.into(),
            id: None,
            extra: Map::new(),
        }
    }
}
