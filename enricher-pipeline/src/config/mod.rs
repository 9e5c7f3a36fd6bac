//! Domain configuration for the enricher.
//!
//! The configuration is loaded once at startup from a JSON document,
//! is immutable thereafter, and is shared by reference across requests.

mod domain;
mod references;

pub use domain::{CollectionDomainConfig, DomainConfig, DomainConfigStore, IndexConfig};
pub use references::{SourceReference, TargetReference};
