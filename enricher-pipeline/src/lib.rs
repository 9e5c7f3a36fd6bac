//! # Enricher Pipeline
//!
//! This crate provides the enrichment components for the data-ingest
//! enricher.
//!
//! ## Architecture
//!
//! The enrichment step is a single orchestration over four collaborators:
//!
//! 1. **Config store**: Resolves the domain configuration for a context
//! 2. **Templater**: Substitutes record fields into the query template
//! 3. **Search store**: Executes the query / indexes target items
//! 4. **Transformer**: Maps the matched record into its outgoing shape

pub mod config;
pub mod errors;
pub mod identity;
pub mod orchestrator;
pub mod templater;
pub mod transform;

pub use errors::EnrichError;
pub use orchestrator::{EnrichmentOutcome, EnrichmentService, EnrichmentStatus};
