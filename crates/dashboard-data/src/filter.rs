//! Date-range selection over a loaded [`Dataset`].

use chrono::NaiveDate;
use dashboard_core::error::Result;
use dashboard_core::models::{DateRange, Dataset, Transaction};

/// Borrowed subset of a [`Dataset`] whose purchase dates fall in a range.
///
/// Records keep their dataset order. The view owns nothing; it is rebuilt
/// for every range request.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    range: DateRange,
    records: Vec<&'a Transaction>,
}

impl<'a> FilteredView<'a> {
    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn records(&self) -> &[&'a Transaction] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Transaction> + '_ {
        self.records.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Select records with `start <= purchase date <= end`.
///
/// Fails with `InvalidRange` when `start > end`; the bounds are never
/// swapped.
pub fn filter(dataset: &Dataset, start: NaiveDate, end: NaiveDate) -> Result<FilteredView<'_>> {
    let range = DateRange::new(start, end)?;
    Ok(filter_range(dataset, &range))
}

/// Select records inside an already-validated range.
pub fn filter_range<'a>(dataset: &'a Dataset, range: &DateRange) -> FilteredView<'a> {
    let records = dataset
        .records()
        .iter()
        .filter(|r| range.contains(r.purchase_date()))
        .collect();

    FilteredView {
        range: *range,
        records,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
