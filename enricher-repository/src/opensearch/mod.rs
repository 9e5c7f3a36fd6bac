//! OpenSearch implementation of the search store.
//!
//! This module provides a concrete implementation of `SearchStore` using
//! OpenSearch as the backend.

mod client;

pub use client::OpenSearchClient;
