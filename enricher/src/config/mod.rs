//! Configuration and dependency wiring for the enricher.

mod dependencies;

pub use dependencies::Dependencies;
