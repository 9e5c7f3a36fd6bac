//! Field reference rules.
//!
//! References describe how to extract values out of an incoming record
//! (source) and how to compose values back into the query template (target)
//! using separator-delimited expressions.

use serde::{Deserialize, Serialize};

/// Rule describing how to pull values out of the incoming data object.
///
/// The value of `field_name` is split by `separator` and zipped positionally
/// against the tokens of `expression`, contributing entries to the
/// resolution map. Expression and value must have the same token count.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceReference {
    /// Name of the field to extract from the data object.
    pub field_name: String,
    /// Separator-delimited pattern naming each token of the field's value.
    pub expression: String,
    /// Token separator shared by the expression and the extracted value.
    pub separator: String,
}

/// Rule describing how to compose a value into the query template.
///
/// The tokens of `expression` are looked up in the resolution map, joined
/// with `separator`, and the result replaces every field named `argument`
/// in the parsed query template.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetReference {
    /// Placeholder field name to replace inside the query template.
    pub argument: String,
    /// Separator-delimited pattern of resolution-map keys.
    pub expression: String,
    /// Token separator used to split and rejoin the expression.
    pub separator: String,
}
