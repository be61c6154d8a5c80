//! The dashboard computation pipeline.
//!
//! [`compute`] is the single entry point a presenter calls on every
//! interaction: it filters the dataset to the selected range and derives the
//! metrics and all three summaries from scratch.

use std::time::Instant;

use dashboard_core::error::Result;
use dashboard_core::models::{DashboardSnapshot, Dataset, DateRange};
use tracing::debug;

use crate::aggregator::{monthly_order_trend, top_review_categories, top_revenue_categories};
use crate::filter::filter_range;
use crate::metrics::compute_metrics;

/// Run Filter → Aggregator → Metrics for `range`.
///
/// `top_k` bounds both category rankings.
pub fn compute(dataset: &Dataset, range: &DateRange, top_k: usize) -> DashboardSnapshot {
    let started = Instant::now();

    let view = filter_range(dataset, range);
    let snapshot = DashboardSnapshot {
        range: *range,
        metrics: compute_metrics(&view),
        top_revenue: top_revenue_categories(&view, top_k),
        top_review: top_review_categories(&view, top_k),
        monthly_trend: monthly_order_trend(&view),
    };

    debug!(
        range = %range,
        rows = view.len(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "dashboard snapshot computed"
    );

    snapshot
}

/// Validate raw bounds, then [`compute`].
///
/// Fails with `InvalidRange` when `start > end`.
pub fn compute_between(
    dataset: &Dataset,
    start: chrono::NaiveDate,
    end: chrono::NaiveDate,
    top_k: usize,
) -> Result<DashboardSnapshot> {
    let range = DateRange::new(start, end)?;
    Ok(compute(dataset, &range, top_k))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
