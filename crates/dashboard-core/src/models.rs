use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};

use crate::error::{DashboardError, Result};

// ── Transaction / Dataset ─────────────────────────────────────────────────────

/// One order-item row of the pre-joined transactions table.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// Wall-clock time the order was placed.
    pub purchase_timestamp: NaiveDateTime,
    /// Product category label; `None` when the source cell is empty.
    pub product_category: Option<String>,
    /// Monetary value of the order item.
    pub price: f64,
    /// Customer review score (1–5); `None` when the order was never reviewed.
    pub review_score: Option<f64>,
}

impl Transaction {
    /// Calendar date of the purchase, time-of-day discarded.
    pub fn purchase_date(&self) -> NaiveDate {
        self.purchase_timestamp.date()
    }
}

/// The full, immutable collection of transactions loaded from the source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Transaction>,
}

impl Dataset {
    pub fn new(records: Vec<Transaction>) -> Self {
        Self { records }
    }

    /// All records in source order.
    pub fn records(&self) -> &[Transaction] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest purchase dates, or `None` for an empty dataset.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.records.iter().map(Transaction::purchase_date);
        let first = dates.next()?;
        Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }

    /// The range spanning every observed purchase date.
    pub fn full_range(&self) -> Option<DateRange> {
        self.date_bounds()
            .map(|(start, end)| DateRange { start, end })
    }
}

// ── DateRange ─────────────────────────────────────────────────────────────────

/// Inclusive `[start, end]` range of calendar dates with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting reversed bounds instead of swapping them.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(DashboardError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// `true` when `date` lies within the range, both ends included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of calendar days covered, counting both ends.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

// ── YearMonth ─────────────────────────────────────────────────────────────────

/// A timestamp truncated to calendar-month granularity.
///
/// Ordering is chronological (year first, then month). Displays and
/// serialises as `"YYYY-MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn from_datetime(ts: &NaiveDateTime) -> Self {
        Self::from_date(ts.date())
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ── Summaries ─────────────────────────────────────────────────────────────────

/// Summed item price for one product category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRevenue {
    pub category: String,
    pub total_price: f64,
}

/// Mean review score for one product category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryReview {
    pub category: String,
    pub mean_review_score: f64,
}

/// Number of order items purchased in one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyOrders {
    pub month: YearMonth,
    pub order_count: usize,
}

/// Scalar headline figures for a filtered view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardMetrics {
    /// Number of records in the view.
    pub total_orders: usize,
    /// Sum of item prices in the view.
    pub total_revenue: f64,
    /// Mean review score, `None` when no record in the view carries a score.
    pub average_review: Option<f64>,
}

/// Everything the presenter needs for one date-range selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub range: DateRange,
    pub metrics: DashboardMetrics,
    pub top_revenue: Vec<CategoryRevenue>,
    pub top_review: Vec<CategoryReview>,
    pub monthly_trend: Vec<MonthlyOrders>,
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tx(ts: &str, category: &str, price: f64) -> Transaction {
        Transaction {
            purchase_timestamp: NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S").unwrap(),
            product_category: Some(category.to_string()),
            price,
            review_score: Some(5.0),
        }
    }

    // ── DateRange ─────────────────────────────────────────────────────────────

    #[test]
    fn test_date_range_rejects_reversed_bounds() {
        let err = DateRange::new(date(2021, 2, 1), date(2021, 1, 1)).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidRange { .. }));
    }

    #[test]
    fn test_date_range_single_day_is_valid() {
        let range = DateRange::new(date(2021, 1, 5), date(2021, 1, 5)).unwrap();
        assert_eq!(range.days(), 1);
        assert!(range.contains(date(2021, 1, 5)));
        assert!(!range.contains(date(2021, 1, 4)));
        assert!(!range.contains(date(2021, 1, 6)));
    }

    #[test]
    fn test_date_range_contains_is_inclusive() {
        let range = DateRange::new(date(2021, 1, 1), date(2021, 1, 31)).unwrap();
        assert!(range.contains(date(2021, 1, 1)));
        assert!(range.contains(date(2021, 1, 31)));
        assert!(!range.contains(date(2021, 2, 1)));
        assert_eq!(range.days(), 31);
    }

    #[test]
    fn test_date_range_display() {
        let range = DateRange::new(date(2021, 1, 1), date(2021, 1, 31)).unwrap();
        assert_eq!(range.to_string(), "2021-01-01 to 2021-01-31");
    }

    // ── Dataset ───────────────────────────────────────────────────────────────

    #[test]
    fn test_dataset_date_bounds() {
        let ds = Dataset::new(vec![
            tx("2021-01-20 08:00:00", "toys", 50.0),
            tx("2021-01-05 23:59:59", "toys", 100.0),
            tx("2021-02-01 00:00:00", "books", 80.0),
        ]);
        assert_eq!(ds.date_bounds(), Some((date(2021, 1, 5), date(2021, 2, 1))));
        let full = ds.full_range().unwrap();
        assert_eq!(full.start(), date(2021, 1, 5));
        assert_eq!(full.end(), date(2021, 2, 1));
    }

    #[test]
    fn test_dataset_empty_has_no_bounds() {
        let ds = Dataset::default();
        assert!(ds.is_empty());
        assert_eq!(ds.len(), 0);
        assert!(ds.date_bounds().is_none());
        assert!(ds.full_range().is_none());
    }

    // ── YearMonth ─────────────────────────────────────────────────────────────

    #[test]
    fn test_year_month_display_zero_pads() {
        assert_eq!(YearMonth::new(2021, 3).to_string(), "2021-03");
        assert_eq!(YearMonth::new(2021, 12).to_string(), "2021-12");
    }

    #[test]
    fn test_year_month_orders_chronologically() {
        assert!(YearMonth::new(2020, 12) < YearMonth::new(2021, 1));
        assert!(YearMonth::new(2021, 2) < YearMonth::new(2021, 10));
    }

    #[test]
    fn test_year_month_serialises_as_string() {
        let json = serde_json::to_string(&YearMonth::new(2018, 7)).unwrap();
        assert_eq!(json, "\"2018-07\"");
    }

    #[test]
    fn test_year_month_from_datetime() {
        let t = tx("2017-11-24 10:00:00", "toys", 1.0);
        assert_eq!(
            YearMonth::from_datetime(&t.purchase_timestamp),
            YearMonth::new(2017, 11)
        );
    }
}
