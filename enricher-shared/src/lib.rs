//! # Enricher Shared
//!
//! Shared types and data structures for the ingest enricher system.

pub mod record;
pub mod target;

pub use record::IncomingRecord;
pub use target::TargetItem;
