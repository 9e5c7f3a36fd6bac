//! Error types for the enricher repository.

mod search_error;

pub use search_error::SearchError;
