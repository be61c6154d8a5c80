//! Per-category rankings and the monthly order trend.
//!
//! All functions are pure over a [`FilteredView`]. Category groups keep
//! first-seen order, and rankings use a stable sort, so categories with equal
//! aggregates stay in the order they first appear in the source.

use std::collections::{BTreeMap, HashMap};

use dashboard_core::models::{CategoryRevenue, CategoryReview, MonthlyOrders, YearMonth};

use crate::filter::FilteredView;

/// Number of categories kept in each ranking by default.
pub const DEFAULT_TOP_K: usize = 5;

// ── CategoryStats ─────────────────────────────────────────────────────────────

/// Running totals for one product category.
#[derive(Debug, Clone, Default)]
struct CategoryStats {
    revenue: f64,
    review_sum: f64,
    review_count: u32,
}

impl CategoryStats {
    fn mean_review(&self) -> Option<f64> {
        (self.review_count > 0).then(|| self.review_sum / f64::from(self.review_count))
    }
}

/// Group the view by category in first-seen order.
///
/// Records without a category are left out, matching a group-by that drops
/// missing keys.
fn group_by_category(view: &FilteredView<'_>) -> Vec<(String, CategoryStats)> {
    let mut order: Vec<(String, CategoryStats)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in view.iter() {
        let Some(category) = record.product_category.as_deref() else {
            continue;
        };
        let slot = *index.entry(category).or_insert_with(|| {
            order.push((category.to_string(), CategoryStats::default()));
            order.len() - 1
        });

        let stats = &mut order[slot].1;
        stats.revenue += record.price;
        if let Some(score) = record.review_score {
            stats.review_sum += score;
            stats.review_count += 1;
        }
    }

    order
}

// ── Rankings ──────────────────────────────────────────────────────────────────

/// The `k` categories with the largest summed price, descending.
pub fn top_revenue_categories(view: &FilteredView<'_>, k: usize) -> Vec<CategoryRevenue> {
    let mut ranked: Vec<CategoryRevenue> = group_by_category(view)
        .into_iter()
        .map(|(category, stats)| CategoryRevenue {
            category,
            total_price: stats.revenue,
        })
        .collect();

    ranked.sort_by(|a, b| b.total_price.total_cmp(&a.total_price));
    ranked.truncate(k);
    ranked
}

/// The `k` categories with the highest mean review score, descending.
///
/// Categories whose records carry no review score are excluded.
pub fn top_review_categories(view: &FilteredView<'_>, k: usize) -> Vec<CategoryReview> {
    let mut ranked: Vec<CategoryReview> = group_by_category(view)
        .into_iter()
        .filter_map(|(category, stats)| {
            stats.mean_review().map(|mean| CategoryReview {
                category,
                mean_review_score: mean,
            })
        })
        .collect();

    ranked.sort_by(|a, b| b.mean_review_score.total_cmp(&a.mean_review_score));
    ranked.truncate(k);
    ranked
}

// ── Trend ─────────────────────────────────────────────────────────────────────

/// Record counts per calendar month, ascending by month.
///
/// Only months present in the view appear; gaps are not filled with zeros.
pub fn monthly_order_trend(view: &FilteredView<'_>) -> Vec<MonthlyOrders> {
    // BTreeMap keeps months sorted.
    let mut counts: BTreeMap<YearMonth, usize> = BTreeMap::new();
    for record in view.iter() {
        *counts
            .entry(YearMonth::from_datetime(&record.purchase_timestamp))
            .or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(month, order_count)| MonthlyOrders { month, order_count })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
