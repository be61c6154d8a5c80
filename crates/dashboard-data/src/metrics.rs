//! Headline figures for a filtered view.

use dashboard_core::models::DashboardMetrics;

use crate::filter::FilteredView;

/// Compute order count, revenue and mean review over `view`.
///
/// `average_review` is `None` when no record in the view carries a score,
/// which includes the empty view.
pub fn compute_metrics(view: &FilteredView<'_>) -> DashboardMetrics {
    let total_revenue = view.iter().map(|r| r.price).sum();

    let (review_sum, review_count) = view
        .iter()
        .filter_map(|r| r.review_score)
        .fold((0.0_f64, 0_u32), |(sum, n), s| (sum + s, n + 1));

    DashboardMetrics {
        total_orders: view.len(),
        total_revenue,
        average_review: (review_count > 0).then(|| review_sum / f64::from(review_count)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::top_revenue_categories;
    use crate::filter::{filter, filter_range};
    use chrono::{NaiveDate, NaiveDateTime};
    use dashboard_core::models::{Dataset, Transaction};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tx(day: &str, category: &str, price: f64, review: Option<f64>) -> Transaction {
        Transaction {
            purchase_timestamp: NaiveDateTime::parse_from_str(
                &format!("{day} 09:15:00"),
                "%Y-%m-%d %H:%M:%S",
            )
            .unwrap(),
            product_category: Some(category.to_string()),
            price,
            review_score: review,
        }
    }

    fn example() -> Dataset {
        Dataset::new(vec![
            tx("2021-01-05", "toys", 100.0, Some(5.0)),
            tx("2021-01-20", "toys", 50.0, Some(3.0)),
            tx("2021-02-01", "books", 80.0, Some(4.0)),
        ])
    }

    #[test]
    fn test_metrics_worked_example() {
        let ds = example();
        let view = filter(&ds, date(2021, 1, 1), date(2021, 1, 31)).unwrap();
        let m = compute_metrics(&view);
        assert_eq!(m.total_orders, 2);
        assert_eq!(m.total_revenue, 150.0);
        assert_eq!(m.average_review, Some(4.0));
    }

    #[test]
    fn test_metrics_empty_view_has_undefined_average() {
        let ds = example();
        let view = filter(&ds, date(2022, 1, 1), date(2022, 1, 31)).unwrap();
        let m = compute_metrics(&view);
        assert_eq!(m.total_orders, 0);
        assert_eq!(m.total_revenue, 0.0);
        assert!(m.average_review.is_none());
    }

    #[test]
    fn test_metrics_average_skips_missing_scores() {
        let ds = Dataset::new(vec![
            tx("2021-01-01", "a", 1.0, Some(2.0)),
            tx("2021-01-01", "a", 1.0, None),
            tx("2021-01-01", "b", 1.0, Some(4.0)),
        ]);
        let m = compute_metrics(&filter_range(&ds, &ds.full_range().unwrap()));
        assert_eq!(m.total_orders, 3);
        assert_eq!(m.average_review, Some(3.0));
    }

    #[test]
    fn test_metrics_revenue_matches_category_breakdown() {
        let ds = Dataset::new(vec![
            tx("2021-01-01", "a", 10.25, None),
            tx("2021-01-02", "b", 20.5, None),
            tx("2021-01-03", "c", 30.0, None),
            tx("2021-01-04", "a", 5.25, None),
        ]);
        let view = filter_range(&ds, &ds.full_range().unwrap());
        let m = compute_metrics(&view);
        let breakdown: f64 = top_revenue_categories(&view, usize::MAX)
            .iter()
            .map(|c| c.total_price)
            .sum();
        assert!((m.total_revenue - breakdown).abs() < 1e-9);
    }

    #[test]
    fn test_uncategorised_revenue_is_outside_category_breakdown() {
        let mut stray = tx("2021-01-02", "unused", 7.5, Some(1.0));
        stray.product_category = None;
        let ds = Dataset::new(vec![
            tx("2021-01-01", "a", 10.0, None),
            stray,
            tx("2021-01-03", "b", 20.0, None),
        ]);
        let view = filter_range(&ds, &ds.full_range().unwrap());
        let m = compute_metrics(&view);
        let breakdown: f64 = top_revenue_categories(&view, usize::MAX)
            .iter()
            .map(|c| c.total_price)
            .sum();

        assert_eq!(m.total_orders, 3);
        assert!((m.total_revenue - 37.5).abs() < 1e-9);
        assert!((m.total_revenue - breakdown - 7.5).abs() < 1e-9);
    }
}
