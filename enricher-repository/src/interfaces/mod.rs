//! Interface definitions for the search store.
//!
//! This module defines the abstract `SearchStore` trait that allows for
//! dependency injection and swappable search backend implementations.

mod search_store;

pub use search_store::SearchStore;
