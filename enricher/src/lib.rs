//! # Enricher
//!
//! Embedding surface for the ingest record enricher.
//!
//! This crate provides the top-level error type and the dependency wiring
//! for building the enrichment step from environment variables. There is no
//! binary and no CLI: the component is meant to be embedded by a host
//! ingest service, which hands records to
//! [`EnrichmentService::enrich`](enricher_pipeline::EnrichmentService::enrich).

pub mod config;

pub use config::Dependencies;

use thiserror::Error;

/// Errors that can occur during enricher initialization.
#[derive(Error, Debug)]
pub enum EnricherError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Enrichment error.
    #[error("Enrichment error: {0}")]
    EnrichError(#[from] enricher_pipeline::EnrichError),

    /// Search error.
    #[error("Search error: {0}")]
    SearchError(#[from] enricher_repository::SearchError),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl EnricherError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
