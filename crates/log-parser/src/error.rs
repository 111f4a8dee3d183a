use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ParseError {
    #[error("The trading log is empty.")]
    Empty,

    #[error("No closed trades were found in the trading log.")]
    NoTrades,

    #[error("Line {line}: '{value}' is not a valid amount.")]
    InvalidNumber { line: usize, value: String },

    #[error("The trading log totals are too large to represent.")]
    TotalsOverflow,
}
