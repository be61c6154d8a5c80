use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

use crate::error::Result;
use crate::models::DateRange;
use crate::time_utils::parse_date;

/// Location of the transactions table relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "dashboard/all_data.csv";

/// Number of categories shown in each ranking when `--top` is not given.
pub const DEFAULT_TOP: u16 = 5;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Interactive e-commerce sales dashboard for the terminal
#[derive(Parser, Debug, Clone)]
#[command(
    name = "ecommerce-dashboard",
    about = "Interactive e-commerce sales dashboard for the terminal",
    version
)]
pub struct Settings {
    /// Path to the pre-joined transactions CSV
    #[arg(long, default_value = DEFAULT_DATA_PATH)]
    pub data_path: PathBuf,

    /// First day of the date range, YYYY-MM-DD (defaults to the earliest purchase)
    #[arg(long, value_parser = parse_date)]
    pub start: Option<NaiveDate>,

    /// Last day of the date range, YYYY-MM-DD (defaults to the latest purchase)
    #[arg(long, value_parser = parse_date)]
    pub end: Option<NaiveDate>,

    /// Interactive dashboard or one-shot report on stdout
    #[arg(long, default_value = "dashboard", value_parser = ["dashboard", "report"])]
    pub view: String,

    /// Report output format
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Number of categories in each ranking (1-50)
    #[arg(long, default_value_t = DEFAULT_TOP, value_parser = clap::value_parser!(u16).range(1..=50))]
    pub top: u16,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments and apply derived overrides.
    pub fn load() -> Self {
        Self::load_from(std::env::args_os())
    }

    /// Same as [`Settings::load`] but with an explicit argument list, so that
    /// tests need not spawn subprocesses.
    pub fn load_from<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let mut settings = Settings::parse_from(args);
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// `true` when the one-shot report view was requested.
    pub fn is_report(&self) -> bool {
        self.view == "report"
    }

    /// `true` when the report should be emitted as JSON.
    pub fn wants_json(&self) -> bool {
        self.format == "json"
    }

    pub fn top_k(&self) -> usize {
        usize::from(self.top)
    }

    /// Resolve the initial date range against the observed dataset bounds.
    ///
    /// Unset ends fall back to the dataset's earliest / latest purchase date.
    /// A reversed range is an error, never silently swapped.
    pub fn resolve_range(&self, bounds: (NaiveDate, NaiveDate)) -> Result<DateRange> {
        let (lo, hi) = bounds;
        DateRange::new(self.start.unwrap_or(lo), self.end.unwrap_or(hi))
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
