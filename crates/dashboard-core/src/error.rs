use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the e-commerce dashboard.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV document is structurally malformed.
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A column the loader depends on is absent from the header row.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A purchase timestamp did not match any recognised format.
    #[error("Invalid timestamp on line {line}: {value:?}")]
    TimestampParse { line: usize, value: String },

    /// A numeric cell could not be interpreted.
    #[error("Invalid value for {column} on line {line}: {value:?}")]
    InvalidField {
        line: usize,
        column: String,
        value: String,
    },

    /// The requested date range has its bounds reversed.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// The source contained a header but no transactions.
    #[error("No transactions found in {0}")]
    EmptyDataset(String),

    /// An error originating from the terminal / TUI layer.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A report could not be serialised.
    #[error("Failed to serialise JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, DashboardError>;
