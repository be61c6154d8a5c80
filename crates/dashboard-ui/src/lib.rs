//! Terminal UI layer for the e-commerce dashboard.
//!
//! Provides themes, the header and date-range selector components, the
//! dashboard screen (metric cards, category bar charts, monthly trend) and
//! the application event loop built on top of [`ratatui`].

pub mod app;
pub mod components;
pub mod dashboard_view;
pub mod themes;

pub use app::App;
pub use dashboard_core as core;
