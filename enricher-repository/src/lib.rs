//! # Enricher Repository
//!
//! This crate provides traits and implementations for interacting with the
//! search backend. It includes definitions for errors, interfaces, a
//! concrete implementation for OpenSearch, and the deprecated legacy REST
//! push path.

pub mod errors;
pub mod interfaces;
pub mod legacy;
pub mod opensearch;

pub use errors::SearchError;
pub use interfaces::SearchStore;
pub use opensearch::OpenSearchClient;
