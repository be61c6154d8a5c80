//! Runtime support for the e-commerce dashboard.
//!
//! Owns the load-once dataset cache that sits between storage and the
//! presenters.

pub mod cache;

pub use cache::{CsvDatasetSource, DatasetCache, DatasetSource, InMemorySource};
pub use dashboard_core as core;
pub use dashboard_data as data;
