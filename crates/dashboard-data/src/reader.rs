//! CSV loading for the transactions table.
//!
//! Reads the pre-joined order-item export and converts every row into a
//! [`Transaction`]. Loading is fail-fast: the first bad timestamp or price
//! aborts the whole load so that aggregations are never silently skewed.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Instant;

use csv::StringRecord;
use dashboard_core::error::{DashboardError, Result};
use dashboard_core::models::{Dataset, Transaction};
use dashboard_core::time_utils::parse_timestamp;
use tracing::{debug, info};

// ── Schema ────────────────────────────────────────────────────────────────────

pub const COL_CATEGORY: &str = "product_category_name";
pub const COL_PRICE: &str = "price";
pub const COL_REVIEW: &str = "review_score";
pub const COL_TIMESTAMP: &str = "order_purchase_timestamp";

/// Columns that must be present in the header row.
pub const REQUIRED_COLUMNS: [&str; 4] = [COL_CATEGORY, COL_PRICE, COL_REVIEW, COL_TIMESTAMP];

/// Cell spellings treated as a missing value for optional columns.
const MISSING_MARKERS: &[&str] = &["nan", "na", "n/a", "null", "none"];

/// Positions of the required columns within a record.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    category: usize,
    price: usize,
    review: usize,
    timestamp: usize,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord) -> Result<Self> {
        let map: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (normalize_header_name(name), idx))
            .collect();

        let find = |name: &str| {
            map.get(name)
                .copied()
                .ok_or_else(|| DashboardError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            category: find(COL_CATEGORY)?,
            price: find(COL_PRICE)?,
            review: find(COL_REVIEW)?,
            timestamp: find(COL_TIMESTAMP)?,
        })
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the transactions CSV at `path` into a [`Dataset`].
pub fn load_transactions(path: &Path) -> Result<Dataset> {
    let started = Instant::now();

    let file = File::open(path).map_err(|source| DashboardError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let dataset = read_transactions(file)?;

    info!(
        "Loaded {} transactions from {} in {:.2}s",
        dataset.len(),
        path.display(),
        started.elapsed().as_secs_f64()
    );

    Ok(dataset)
}

/// Parse transactions from any CSV byte stream.
///
/// The first row must be a header containing every column in
/// [`REQUIRED_COLUMNS`]; other columns are ignored.
pub fn read_transactions<R: Read>(source: R) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    let columns = ColumnIndex::resolve(&headers)?;
    debug!(
        "CSV headers resolved: {:?}",
        headers.iter().collect::<Vec<_>>()
    );

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        // Header is line 1; prefer the reader's own position so quoted
        // multi-line cells still report the right line.
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(idx + 2);
        records.push(parse_record(&record, &columns, line)?);
    }

    Ok(Dataset::new(records))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn normalize_header_name(name: &str) -> String {
    name.trim().trim_start_matches('\u{feff}').to_ascii_lowercase()
}

fn is_missing(cell: &str) -> bool {
    cell.is_empty() || MISSING_MARKERS.iter().any(|m| cell.eq_ignore_ascii_case(m))
}

fn parse_record(record: &StringRecord, columns: &ColumnIndex, line: usize) -> Result<Transaction> {
    let cell = |idx: usize| record.get(idx).unwrap_or("").trim();

    let raw_ts = cell(columns.timestamp);
    let purchase_timestamp =
        parse_timestamp(raw_ts).ok_or_else(|| DashboardError::TimestampParse {
            line,
            value: raw_ts.to_string(),
        })?;

    // Category labels are grouping keys and stay verbatim.
    let raw_category = record.get(columns.category).unwrap_or("");
    let product_category = if is_missing(raw_category.trim()) {
        None
    } else {
        Some(raw_category.to_string())
    };

    let raw_price = cell(columns.price);
    let price = raw_price
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite() && *p >= 0.0)
        .ok_or_else(|| invalid(line, COL_PRICE, raw_price))?;

    let raw_review = cell(columns.review);
    let review_score = if is_missing(raw_review) {
        None
    } else {
        let score = raw_review
            .parse::<f64>()
            .ok()
            .filter(|s| s.is_finite())
            .ok_or_else(|| invalid(line, COL_REVIEW, raw_review))?;
        Some(score)
    };

    Ok(Transaction {
        purchase_timestamp,
        product_category,
        price,
        review_score,
    })
}

fn invalid(line: usize, column: &str, value: &str) -> DashboardError {
    DashboardError::InvalidField {
        line,
        column: column.to_string(),
        value: value.to_string(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
