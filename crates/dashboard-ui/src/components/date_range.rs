//! Interactive start/end date picker for the sidebar.
//!
//! The selector is confined to the observed purchase-date extrema of the
//! dataset. Every edit is clamped so that `start <= end` always holds; a move
//! that would cross the other bound stops at it.

use chrono::NaiveDate;
use dashboard_core::models::DateRange;
use dashboard_core::time_utils::{clamp_date, shift_days, shift_months};
use ratatui::text::{Line, Span};

use crate::themes::Theme;

/// Which end of the range keyboard edits apply to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Start,
    End,
}

impl Bound {
    fn label(self) -> &'static str {
        match self {
            Bound::Start => "Start",
            Bound::End => "End",
        }
    }
}

#[derive(Debug, Clone)]
pub struct DateRangeSelector {
    limits: DateRange,
    range: DateRange,
    focus: Bound,
}

impl DateRangeSelector {
    /// Selector spanning `limits`, starting at `initial` clamped into them.
    pub fn new(limits: DateRange, initial: DateRange) -> Self {
        let start = clamp_date(initial.start(), limits.start(), limits.end());
        let end = clamp_date(initial.end(), limits.start(), limits.end());
        let range = DateRange::new(start, end).unwrap_or(limits);
        Self {
            limits,
            range,
            focus: Bound::Start,
        }
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn limits(&self) -> DateRange {
        self.limits
    }

    pub fn focus(&self) -> Bound {
        self.focus
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Bound::Start => Bound::End,
            Bound::End => Bound::Start,
        };
    }

    fn focused_date(&self) -> NaiveDate {
        match self.focus {
            Bound::Start => self.range.start(),
            Bound::End => self.range.end(),
        }
    }

    /// Move the focused bound to `date`, clamped between its limit and the
    /// other bound. Returns `true` when the range changed.
    pub fn set_focused(&mut self, date: NaiveDate) -> bool {
        let (start, end) = match self.focus {
            Bound::Start => (
                clamp_date(date, self.limits.start(), self.range.end()),
                self.range.end(),
            ),
            Bound::End => (
                self.range.start(),
                clamp_date(date, self.range.start(), self.limits.end()),
            ),
        };
        self.replace(start, end)
    }

    pub fn shift_days(&mut self, delta: i64) -> bool {
        self.set_focused(shift_days(self.focused_date(), delta))
    }

    pub fn shift_months(&mut self, delta: i32) -> bool {
        self.set_focused(shift_months(self.focused_date(), delta))
    }

    /// Jump the focused bound as far back as it may go.
    pub fn jump_first(&mut self) -> bool {
        self.set_focused(self.limits.start())
    }

    /// Jump the focused bound as far forward as it may go.
    pub fn jump_last(&mut self) -> bool {
        self.set_focused(self.limits.end())
    }

    /// Restore the full observed range.
    pub fn reset(&mut self) -> bool {
        self.replace(self.limits.start(), self.limits.end())
    }

    fn replace(&mut self, start: NaiveDate, end: NaiveDate) -> bool {
        match DateRange::new(start, end) {
            Ok(next) if next != self.range => {
                self.range = next;
                true
            }
            _ => false,
        }
    }

    /// Sidebar lines: a heading, one row per bound, then the limits.
    pub fn to_lines<'a>(&self, theme: &'a Theme) -> Vec<Line<'a>> {
        let row = |bound: Bound, date: NaiveDate| {
            let (marker, style) = if bound == self.focus {
                ("▶ ", theme.focus)
            } else {
                ("  ", theme.value)
            };
            Line::from(vec![
                Span::styled(marker, theme.info),
                Span::styled(format!("{:<6}", bound.label()), theme.label),
                Span::styled(format!(" {date} "), style),
            ])
        };

        vec![
            Line::from(Span::styled("Date range", theme.bold)),
            row(Bound::Start, self.range.start()),
            row(Bound::End, self.range.end()),
            Line::from(Span::styled(
                format!("  min {}", self.limits.start()),
                theme.dim,
            )),
            Line::from(Span::styled(
                format!("  max {}", self.limits.end()),
                theme.dim,
            )),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
