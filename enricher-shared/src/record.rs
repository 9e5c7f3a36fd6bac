//! Incoming record type.
//!
//! Defines the record structure that flows through the enrichment step.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Context name that selects the target indexing branch.
pub const TARGET_CONTEXT: &str = "target";

/// A record entering the enrichment step.
///
/// The record carries a context discriminator that selects which domain
/// configuration applies, and a data object whose shape depends on that
/// context (a single structured record for collection contexts, an ordered
/// sequence for the target context).
///
/// Top-level keys other than the known ones are preserved untouched so the
/// record survives a round trip through the enricher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingRecord {
    /// Discriminator selecting the domain configuration and code path.
    #[serde(rename = "dataContext")]
    pub data_context: String,
    /// The payload; a single object or an ordered sequence of objects.
    #[serde(rename = "dataObject")]
    pub data_object: Value,
    /// The merge key populated by a successful enrichment.
    #[serde(
        rename = "domainObject",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub domain_object: Option<Value>,
    /// Any additional top-level keys, preserved as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl IncomingRecord {
    /// Create a new record with the given context and data object.
    pub fn new(data_context: impl Into<String>, data_object: Value) -> Self {
        Self {
            data_context: data_context.into(),
            data_object,
            domain_object: None,
            extra: Map::new(),
        }
    }

    /// Whether this record belongs to the target context (case-insensitive).
    pub fn is_target_context(&self) -> bool {
        self.data_context.eq_ignore_ascii_case(TARGET_CONTEXT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_round_trip_preserves_unknown_keys() {
        let raw = json!({
            "dataContext": "property-tax",
            "dataObject": { "businessService": "PT" },
            "tenantId": "pb.amritsar",
            "version": 2
        });

        let record: IncomingRecord = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(record.data_context, "property-tax");
        assert_eq!(record.extra["tenantId"], json!("pb.amritsar"));
        assert!(record.domain_object.is_none());

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back, raw);
    }

    #[test]
    fn test_target_context_is_case_insensitive() {
        let record = IncomingRecord::new("TARGET", json!([]));
        assert!(record.is_target_context());

        let record = IncomingRecord::new("collections", json!({}));
        assert!(!record.is_target_context());
    }

    #[test]
    fn test_domain_object_serialized_when_present() {
        let mut record = IncomingRecord::new("collections", json!({}));
        record.domain_object = Some(json!({ "totalAmount": 1200 }));

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back["domainObject"]["totalAmount"], json!(1200));
    }
}
