//! Core types shared by every dashboard crate.
//!
//! Holds the transaction data model, the error type, timestamp parsing,
//! number and currency formatting, and the command-line settings.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;

pub use error::{DashboardError, Result};
