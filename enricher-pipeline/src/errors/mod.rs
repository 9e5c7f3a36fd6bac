//! Error types for the enricher pipeline.

use enricher_repository::SearchError;
use thiserror::Error;

/// Errors that can occur while enriching a record.
///
/// The orchestrator catches these at its boundary and surfaces them through
/// the per-record outcome; they never propagate to the caller as a failed
/// call. All variants carry strings so outcomes can own a clone.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EnrichError {
    /// Configuration could not be loaded or parsed.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// No index configuration exists for the business type.
    #[error("No index configuration for business type: {0}")]
    UnknownBusinessType(String),

    /// A field named by a source reference is absent from the record.
    #[error("Missing field: {0}")]
    MissingField(String),

    /// A field named by a source reference is not a scalar value.
    #[error("Field is not a scalar value: {0}")]
    NonScalarField(String),

    /// Expression and extracted value disagree on token count.
    #[error("Token count mismatch for field {field}: expression has {expected} tokens, value has {actual}")]
    TokenCountMismatch {
        field: String,
        expected: usize,
        actual: usize,
    },

    /// The query template is not valid JSON.
    #[error("Query template parse error: {0}")]
    QueryParseError(String),

    /// The substituted query matched no record.
    #[error("No match in index {index} for business type {business_type}")]
    NoMatch {
        index: String,
        business_type: String,
    },

    /// The record transformer rejected the matched record.
    #[error("Transform error: {0}")]
    TransformError(String),

    /// A target item could not be deserialized.
    #[error("Invalid target item: {0}")]
    InvalidItem(String),

    /// Error from the search backend.
    #[error("Search error: {0}")]
    SearchError(String),
}

impl EnrichError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Create an unknown business type error.
    pub fn unknown_business_type(business_type: impl Into<String>) -> Self {
        Self::UnknownBusinessType(business_type.into())
    }

    /// Create a missing field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField(field.into())
    }

    /// Create a query parse error.
    pub fn query_parse(msg: impl Into<String>) -> Self {
        Self::QueryParseError(msg.into())
    }

    /// Create a transform error.
    pub fn transform(msg: impl Into<String>) -> Self {
        Self::TransformError(msg.into())
    }

    /// Create an invalid item error.
    pub fn invalid_item(msg: impl Into<String>) -> Self {
        Self::InvalidItem(msg.into())
    }
}

impl From<SearchError> for EnrichError {
    fn from(err: SearchError) -> Self {
        Self::SearchError(err.to_string())
    }
}
