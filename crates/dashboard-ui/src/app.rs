//! Main application state and TUI event loop for the dashboard.
//!
//! [`App`] owns the theme, the shared dataset, the date-range selector and
//! the snapshot computed for the current selection. Any key that changes the
//! range triggers a full recompute through [`dashboard_data::compute`].

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};

use dashboard_core::models::{DashboardSnapshot, Dataset, DateRange};
use dashboard_data::compute;

use crate::components::date_range::DateRangeSelector;
use crate::dashboard_view::{self, DashboardViewData};
use crate::themes::Theme;

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the dashboard TUI.
pub struct App {
    pub theme: Theme,
    dataset: Arc<Dataset>,
    /// `None` when the dataset has no records.
    selector: Option<DateRangeSelector>,
    snapshot: Option<DashboardSnapshot>,
    top_k: usize,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
}

impl App {
    /// Build the app and compute the first snapshot for `initial`.
    ///
    /// `initial` is clamped into the dataset's observed date bounds.
    pub fn new(theme_name: &str, dataset: Arc<Dataset>, initial: DateRange, top_k: usize) -> Self {
        let selector = dataset
            .full_range()
            .map(|limits| DateRangeSelector::new(limits, initial));
        let mut app = Self {
            theme: Theme::from_name(theme_name),
            dataset,
            selector,
            snapshot: None,
            top_k,
            should_quit: false,
        };
        app.recompute();
        app
    }

    pub fn snapshot(&self) -> Option<&DashboardSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn selector(&self) -> Option<&DateRangeSelector> {
        self.selector.as_ref()
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the interactive dashboard until the user quits.
    ///
    /// Uses `crossterm::event::poll` with a 250 ms timeout so the loop stays
    /// on the current thread. Exits on `q`, `Q`, `Esc` or `Ctrl+C`.
    pub async fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame)) {
                break Err(e);
            }

            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key);
                    }
                    Ok(_) => {}
                    Err(e) => break Err(e),
                },
                Ok(false) => {}
                Err(e) => break Err(e),
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    /// Apply one key press. Returns `true` when the selected range changed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return false;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
                return false;
            }
            _ => {}
        }

        let Some(selector) = self.selector.as_mut() else {
            return false;
        };

        let changed = match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                selector.toggle_focus();
                false
            }
            KeyCode::Left | KeyCode::Char('h') => selector.shift_days(-1),
            KeyCode::Right | KeyCode::Char('l') => selector.shift_days(1),
            KeyCode::Down | KeyCode::Char('j') => selector.shift_months(-1),
            KeyCode::Up | KeyCode::Char('k') => selector.shift_months(1),
            KeyCode::Home => selector.jump_first(),
            KeyCode::End => selector.jump_last(),
            KeyCode::Char('r') | KeyCode::Char('R') => selector.reset(),
            _ => false,
        };

        if changed {
            self.recompute();
        }
        changed
    }

    // ── Private helpers ───────────────────────────────────────────────────────

    fn recompute(&mut self) {
        self.snapshot = self.selector.as_ref().map(|selector| {
            let range = selector.range();
            tracing::debug!(%range, "recomputing dashboard");
            compute(&self.dataset, &range, self.top_k)
        });
    }

    /// Render the current application state into `frame`.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        match (&self.snapshot, &self.selector) {
            (Some(snapshot), Some(selector)) => {
                let data = DashboardViewData {
                    snapshot,
                    selector,
                    dataset_rows: self.dataset.len(),
                };
                dashboard_view::render_dashboard(frame, area, &data, &self.theme);
            }
            _ => dashboard_view::render_no_data(frame, area, &self.theme),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use dashboard_core::models::Transaction;
    use ratatui::backend::TestBackend;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tx(ts: &str, category: &str, price: f64, review: f64) -> Transaction {
        Transaction {
            purchase_timestamp: NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S").unwrap(),
            product_category: Some(category.to_string()),
            price,
            review_score: Some(review),
        }
    }

    fn dataset() -> Arc<Dataset> {
        Arc::new(Dataset::new(vec![
            tx("2021-01-05 10:00:00", "toys", 100.0, 5.0),
            tx("2021-01-20 10:00:00", "toys", 50.0, 3.0),
            tx("2021-02-01 10:00:00", "books", 80.0, 4.0),
            tx("2021-03-15 10:00:00", "garden", 40.0, 2.0),
        ]))
    }

    fn app() -> App {
        let ds = dataset();
        let full = ds.full_range().unwrap();
        App::new("dark", ds, full, 5)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_app_creation_computes_initial_snapshot() {
        let app = app();
        let snap = app.snapshot().unwrap();
        assert_eq!(snap.metrics.total_orders, 4);
        assert_eq!(snap.range.start(), date(2021, 1, 5));
        assert_eq!(snap.range.end(), date(2021, 3, 15));
        assert!(!app.should_quit);
    }

    #[test]
    fn test_app_initial_range_is_clamped() {
        let ds = dataset();
        let wide = DateRange::new(date(2000, 1, 1), date(2030, 1, 1)).unwrap();
        let app = App::new("light", Arc::clone(&ds), wide, 5);
        assert_eq!(app.snapshot().unwrap().range, ds.full_range().unwrap());
    }

    #[test]
    fn test_app_empty_dataset_has_no_snapshot() {
        let ds = Arc::new(Dataset::default());
        let range = DateRange::new(date(2021, 1, 1), date(2021, 1, 1)).unwrap();
        let mut app = App::new("dark", ds, range, 5);
        assert!(app.snapshot().is_none());
        assert!(!app.handle_key(press(KeyCode::Right)));
    }

    #[test]
    fn test_quit_keys() {
        for key in [
            press(KeyCode::Char('q')),
            press(KeyCode::Char('Q')),
            press(KeyCode::Esc),
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            let mut app = app();
            app.handle_key(key);
            assert!(app.should_quit, "{key:?} should quit");
        }
    }

    #[test]
    fn test_plain_c_does_not_quit() {
        let mut app = app();
        app.handle_key(press(KeyCode::Char('c')));
        assert!(!app.should_quit);
    }

    #[test]
    fn test_range_change_recomputes_snapshot() {
        let mut app = app();
        // Start moves one month forward: 2021-02-05, dropping both January rows.
        assert!(app.handle_key(press(KeyCode::Up)));
        let snap = app.snapshot().unwrap();
        assert_eq!(snap.range.start(), date(2021, 2, 5));
        assert_eq!(snap.metrics.total_orders, 1);
        assert_eq!(snap.top_revenue[0].category, "garden");
    }

    #[test]
    fn test_tab_switches_edited_bound() {
        let mut app = app();
        assert!(!app.handle_key(press(KeyCode::Tab)));
        assert!(app.handle_key(press(KeyCode::Left)));
        let snap = app.snapshot().unwrap();
        assert_eq!(snap.range.start(), date(2021, 1, 5));
        assert_eq!(snap.range.end(), date(2021, 3, 14));
        assert_eq!(snap.metrics.total_orders, 3);
    }

    #[test]
    fn test_reset_restores_full_range() {
        let mut app = app();
        app.handle_key(press(KeyCode::End));
        assert_eq!(app.snapshot().unwrap().metrics.total_orders, 1);

        assert!(app.handle_key(press(KeyCode::Char('r'))));
        assert_eq!(app.snapshot().unwrap().metrics.total_orders, 4);
    }

    #[test]
    fn test_noop_key_keeps_snapshot() {
        let mut app = app();
        let before = app.snapshot().cloned();
        assert!(!app.handle_key(press(KeyCode::Left)), "start is at the lower bound");
        assert!(!app.handle_key(press(KeyCode::Char('x'))));
        assert_eq!(app.snapshot().cloned(), before);
    }

    #[test]
    fn test_render_does_not_panic() {
        let app = app();
        let mut terminal = Terminal::new(TestBackend::new(120, 36)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();

        let empty = App::new(
            "classic",
            Arc::new(Dataset::default()),
            DateRange::new(date(2021, 1, 1), date(2021, 1, 1)).unwrap(),
            5,
        );
        terminal.draw(|frame| empty.render(frame)).unwrap();
    }
}
