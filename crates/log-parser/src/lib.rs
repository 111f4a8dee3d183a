//! # Tradelog Log Parser
//!
//! Turns the raw text of a daily trading log (pasted from a broker export or a
//! journal) into a structured `AnalysisRecord`.
//!
//! ## Public API
//!
//! - `parse_trading_log`: raw text to `AnalysisRecord`.
//! - `extract_log_date` / `log_date_or_today`: the calendar day a log belongs to.
//! - `ParseError`: the specific error types that can be returned from this crate.

pub mod date;
pub mod error;
pub mod parser;

pub use date::{extract_log_date, log_date_or_today};
pub use error::ParseError;
pub use parser::parse_trading_log;
