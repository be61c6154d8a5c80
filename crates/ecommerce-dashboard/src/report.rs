//! One-shot report view: the same snapshot the TUI shows, printed to stdout.

use std::fmt::Write;

use dashboard_core::formatting::{format_count, format_review, format_rupiah};
use dashboard_core::models::DashboardSnapshot;

const LABEL_WIDTH: usize = 16;

/// Pretty JSON form of `snapshot`.
pub fn render_json(snapshot: &DashboardSnapshot) -> serde_json::Result<String> {
    serde_json::to_string_pretty(snapshot)
}

/// Aligned plain-text form of `snapshot`.
pub fn render_text(snapshot: &DashboardSnapshot) -> String {
    let mut out = String::new();
    let metrics = &snapshot.metrics;

    // Writing into a String cannot fail.
    let _ = writeln!(out, "E-Commerce Dashboard");
    let _ = writeln!(out, "{}", "=".repeat(60));
    let _ = writeln!(
        out,
        "{:<LABEL_WIDTH$}{} ({} days)",
        "Range",
        snapshot.range,
        snapshot.range.days()
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "{:<LABEL_WIDTH$}{}", "Total orders", format_count(metrics.total_orders));
    let _ = writeln!(
        out,
        "{:<LABEL_WIDTH$}{}",
        "Total revenue",
        format_rupiah(metrics.total_revenue)
    );
    let _ = writeln!(
        out,
        "{:<LABEL_WIDTH$}{}",
        "Average review",
        format_review(metrics.average_review)
    );

    let revenue: Vec<(String, String)> = snapshot
        .top_revenue
        .iter()
        .map(|c| (c.category.clone(), format_rupiah(c.total_price)))
        .collect();
    section(&mut out, "Top categories by revenue", &revenue, true);

    let review: Vec<(String, String)> = snapshot
        .top_review
        .iter()
        .map(|c| (c.category.clone(), format!("{:.2}", c.mean_review_score)))
        .collect();
    section(&mut out, "Top categories by review", &review, true);

    let trend: Vec<(String, String)> = snapshot
        .monthly_trend
        .iter()
        .map(|m| (m.month.to_string(), format_count(m.order_count)))
        .collect();
    section(&mut out, "Orders per month", &trend, false);

    out
}

/// A titled two-column block, value column right-aligned.
fn section(out: &mut String, title: &str, rows: &[(String, String)], ranked: bool) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "-".repeat(title.len()));

    if rows.is_empty() {
        let _ = writeln!(out, "  (no data)");
        return;
    }

    let key_width = rows.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, v)| v.chars().count()).max().unwrap_or(0);
    for (i, (key, value)) in rows.iter().enumerate() {
        let rank = if ranked {
            format!("{:>2}. ", i + 1)
        } else {
            String::new()
        };
        let _ = writeln!(out, "  {rank}{key:<key_width$}  {value:>value_width$}");
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
