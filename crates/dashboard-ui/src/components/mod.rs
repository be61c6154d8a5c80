//! Reusable pieces of the dashboard screen.

pub mod date_range;
pub mod header;
