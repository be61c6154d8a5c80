use dashboard_core::formatting::format_count;
use dashboard_core::models::DateRange;
use ratatui::text::{Line, Span};

use crate::themes::Theme;

/// Decorative marker placed either side of the application title.
pub const ACCENT: &str = "◆ ◇ ◆";

/// Width of the `=` separator under the title.
pub const SEPARATOR_WIDTH: usize = 60;

/// Dashboard header rendering four lines:
///
/// 1. Application title with accent decorations (ALL CAPS).
/// 2. A 60-column `=` separator.
/// 3. The active range and dataset size as `[ range | N days | M rows ]`.
/// 4. An empty line.
pub struct Header<'a> {
    pub range: DateRange,
    /// Row count of the whole dataset, not of the filtered view.
    pub dataset_rows: usize,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(range: DateRange, dataset_rows: usize, theme: &'a Theme) -> Self {
        Self {
            range,
            dataset_rows,
            theme,
        }
    }

    /// Render the header as exactly four lines.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let days = self.range.days();
        let day_label = if days == 1 { "day" } else { "days" };

        vec![
            Line::from(vec![
                Span::styled(ACCENT, self.theme.header_accent),
                Span::styled(" E-COMMERCE DASHBOARD ", self.theme.header),
                Span::styled(ACCENT, self.theme.header_accent),
            ]),
            Line::from(Span::styled(
                "=".repeat(SEPARATOR_WIDTH),
                self.theme.separator,
            )),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(self.range.to_string(), self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(format!("{days} {day_label}"), self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(
                    format!("{} rows", format_count(self.dataset_rows)),
                    self.theme.value,
                ),
                Span::styled(" ]", self.theme.label),
            ]),
            Line::from(""),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
