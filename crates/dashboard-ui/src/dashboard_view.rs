//! Main dashboard screen.
//!
//! Sidebar with the date-range selector and key help on the left; header,
//! three metric cards, the two category bar charts and the monthly order
//! trend on the right. Every section falls back to a placeholder when the
//! selected range holds no data for it.

use dashboard_core::formatting::{format_compact, format_count, format_review, format_rupiah};
use dashboard_core::models::{CategoryRevenue, CategoryReview, DashboardSnapshot, MonthlyOrders};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    symbols,
    text::{Line, Span, Text},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset as ChartDataset, GraphType,
        Paragraph,
    },
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::components::date_range::DateRangeSelector;
use crate::components::header::Header;
use crate::themes::Theme;

/// Widest category label drawn next to a bar.
pub const MAX_LABEL_WIDTH: usize = 22;

const SIDEBAR_WIDTH: u16 = 32;
const NO_DATA: &str = "No data in the selected range";

/// Everything the dashboard screen draws.
pub struct DashboardViewData<'a> {
    pub snapshot: &'a DashboardSnapshot,
    pub selector: &'a DateRangeSelector,
    /// Row count of the full dataset.
    pub dataset_rows: usize,
}

/// Render the whole dashboard into `area`.
pub fn render_dashboard(frame: &mut Frame, area: Rect, data: &DashboardViewData<'_>, theme: &Theme) {
    let [sidebar, main] =
        Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(40)]).areas(area);

    render_sidebar(frame, sidebar, data.selector, theme);

    let [header, cards, bars, trend] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Min(8),
        Constraint::Min(10),
    ])
    .areas(main);

    let header_lines = Header::new(data.snapshot.range, data.dataset_rows, theme).to_lines();
    frame.render_widget(Paragraph::new(Text::from(header_lines)), header);

    render_metric_cards(frame, cards, data.snapshot, theme);

    let [revenue, review] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(bars);
    render_revenue_chart(frame, revenue, &data.snapshot.top_revenue, theme);
    render_review_chart(frame, review, &data.snapshot.top_review, theme);

    render_trend_chart(frame, trend, &data.snapshot.monthly_trend, theme);
}

// ── Sidebar ───────────────────────────────────────────────────────────────────

fn render_sidebar(frame: &mut Frame, area: Rect, selector: &DateRangeSelector, theme: &Theme) {
    let mut lines = selector.to_lines(theme);
    lines.push(Line::from(""));
    lines.extend(key_help_lines(theme));

    let paragraph = Paragraph::new(Text::from(lines))
        .style(theme.text)
        .block(panel(" Filters ", theme));
    frame.render_widget(paragraph, area);
}

/// Key bindings shown under the selector.
pub fn key_help_lines(theme: &Theme) -> Vec<Line<'_>> {
    [
        ("Tab", "switch bound"),
        ("←/→", "±1 day"),
        ("↑/↓", "±1 month"),
        ("Home/End", "first/last date"),
        ("r", "reset range"),
        ("q", "quit"),
    ]
    .into_iter()
    .map(|(key, action)| {
        Line::from(vec![
            Span::styled(format!("{key:<9}"), theme.info),
            Span::styled(action, theme.dim),
        ])
    })
    .collect()
}

// ── Metric cards ──────────────────────────────────────────────────────────────

fn render_metric_cards(frame: &mut Frame, area: Rect, snapshot: &DashboardSnapshot, theme: &Theme) {
    let [orders, revenue, review] = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .areas(area);

    let metrics = &snapshot.metrics;
    let cards = [
        (
            orders,
            " Total orders ",
            format_count(metrics.total_orders),
            theme.value,
        ),
        (
            revenue,
            " Total revenue ",
            format_rupiah(metrics.total_revenue),
            theme.value,
        ),
        (
            review,
            " Average review ",
            format_review(metrics.average_review),
            theme.review_style(metrics.average_review),
        ),
    ];

    for (rect, title, value, style) in cards {
        let card = Paragraph::new(Line::from(Span::styled(value, style)))
            .alignment(Alignment::Center)
            .block(panel(title, theme));
        frame.render_widget(card, rect);
    }
}

// ── Bar charts ────────────────────────────────────────────────────────────────

fn render_revenue_chart(frame: &mut Frame, area: Rect, rows: &[CategoryRevenue], theme: &Theme) {
    let block = panel(" Top categories by revenue ", theme);
    if rows.is_empty() {
        render_placeholder(frame, area, block, theme);
        return;
    }

    let bars: Vec<Bar> = rows
        .iter()
        .map(|row| {
            Bar::default()
                .value(row.total_price.max(0.0).round() as u64)
                .label(Line::from(truncate_label(&row.category, MAX_LABEL_WIDTH)))
                .text_value(format_compact(row.total_price))
                .style(theme.bar_revenue)
                .value_style(theme.bar_value)
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .label_style(theme.label)
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, area);
}

fn render_review_chart(frame: &mut Frame, area: Rect, rows: &[CategoryReview], theme: &Theme) {
    let block = panel(" Top categories by review ", theme);
    if rows.is_empty() {
        render_placeholder(frame, area, block, theme);
        return;
    }

    // Scores are scaled by 100 so two decimals survive the integer bar value.
    let bars: Vec<Bar> = rows
        .iter()
        .map(|row| {
            Bar::default()
                .value((row.mean_review_score.max(0.0) * 100.0).round() as u64)
                .label(Line::from(truncate_label(&row.category, MAX_LABEL_WIDTH)))
                .text_value(format!("{:.2}", row.mean_review_score))
                .style(theme.review_style(Some(row.mean_review_score)))
                .value_style(theme.bar_value)
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .max(500)
        .label_style(theme.label)
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, area);
}

// ── Trend chart ───────────────────────────────────────────────────────────────

fn render_trend_chart(frame: &mut Frame, area: Rect, trend: &[MonthlyOrders], theme: &Theme) {
    let block = panel(" Orders per month ", theme);
    if trend.is_empty() {
        render_placeholder(frame, area, block, theme);
        return;
    }

    let points: Vec<(f64, f64)> = trend
        .iter()
        .enumerate()
        .map(|(i, m)| (i as f64, m.order_count as f64))
        .collect();

    let peak = trend.iter().map(|m| m.order_count).max().unwrap_or(0) as f64;
    let y_max = (peak * 1.1).ceil().max(1.0);
    let x_max = (trend.len().saturating_sub(1) as f64).max(1.0);

    // A single month cannot form a line.
    let graph_type = if trend.len() > 1 {
        GraphType::Line
    } else {
        GraphType::Scatter
    };

    let series = ChartDataset::default()
        .name("orders")
        .marker(symbols::Marker::Braille)
        .graph_type(graph_type)
        .style(theme.trend_line)
        .data(&points);

    let chart = Chart::new(vec![series])
        .block(block)
        .x_axis(
            Axis::default()
                .style(theme.axis)
                .bounds([0.0, x_max])
                .labels(month_axis_labels(trend)),
        )
        .y_axis(
            Axis::default()
                .style(theme.axis)
                .bounds([0.0, y_max])
                .labels(vec![
                    "0".to_string(),
                    format_compact(y_max / 2.0),
                    format_compact(y_max),
                ]),
        );
    frame.render_widget(chart, area);
}

/// First, middle and last month, without duplicates.
pub fn month_axis_labels(trend: &[MonthlyOrders]) -> Vec<String> {
    let Some(last) = trend.len().checked_sub(1) else {
        return Vec::new();
    };
    let mut picks = vec![0, last / 2, last];
    picks.dedup();
    picks.into_iter().map(|i| trend[i].month.to_string()).collect()
}

// ── Shared helpers ────────────────────────────────────────────────────────────

fn panel<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(Span::styled(title, theme.bold))
}

fn render_placeholder(frame: &mut Frame, area: Rect, block: Block<'_>, theme: &Theme) {
    let paragraph = Paragraph::new(Line::from(Span::styled(NO_DATA, theme.dim)))
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, area);
}

/// Cut `label` to at most `max_width` display columns, ending in `…` when
/// shortened.
pub fn truncate_label(label: &str, max_width: usize) -> String {
    if label.width() <= max_width {
        return label.to_string();
    }
    let budget = max_width.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0;
    for ch in label.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

/// Render the "no transactions" screen used before any data is available.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No transactions loaded", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            "Check --data-path points at the orders CSV.",
            theme.dim,
        )),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text)).block(panel(" E-Commerce Dashboard ", theme)),
        area,
    );
}

// ── Tests ─────────────────────────────────────────────────────────────────────
