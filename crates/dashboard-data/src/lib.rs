//! Data layer for the e-commerce dashboard.
//!
//! Loads the transactions CSV, filters it to a date range, and derives the
//! headline metrics, category rankings and monthly trend that the presenters
//! render.

pub mod aggregator;
pub mod analysis;
pub mod filter;
pub mod metrics;
pub mod reader;

pub use analysis::{compute, compute_between};
pub use dashboard_core as core;
pub use filter::{filter, filter_range, FilteredView};
