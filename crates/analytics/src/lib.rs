//! # Tradelog Analytics
//!
//! Rolls stored trading days up into weeks and weeks into quarters, and derives
//! the display-only figures (win rate, tone, signed currency) the dashboard shows.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** Nothing in this crate does I/O. It depends only on `core-types`.
//! - **Stateless Calculation:** Every function takes its input by reference and returns
//!   fresh values, so it can be called from any number of requests at once.
//! - **Calendar Safety:** Quarter bucketing reads year and month straight from the
//!   `weekStart` string and never goes through a timezone-aware date.
//!
//! ## Public API
//!
//! - `group_weeks_by_quarter` / `try_group_weeks_by_quarter`: the quarter rollup.
//! - `build_week_logs`: the week rollup over stored days.
//! - `display`: win rate, grades and currency formatting.
//! - `WeeklyLogView`: explicit state for the weekly log view.

// Declare the modules that constitute this crate.
pub mod display;
pub mod error;
pub mod quarters;
pub mod view;
pub mod weeks;

// Re-export the key components to create a clean, public-facing API.
pub use display::{format_currency, win_rate, HeadlineDisplay, PnlTone, WinRateGrade};
pub use error::AnalyticsError;
pub use quarters::{group_weeks_by_quarter, quarter_key, try_group_weeks_by_quarter};
pub use view::WeeklyLogView;
pub use weeks::{build_week_logs, week_start_of};
