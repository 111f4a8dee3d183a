use crate::error::ParseError;
use core_types::{AnalysisRecord, ParsedTrade, TradeSide};
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::LazyLock;

static PNL_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:pnl|p&l|p/l|realized)\s*[:=]\s*(?P<amount>[+-]?\s*\$?\s*[+-]?[\d,]*\.?\d+)")
        .expect("pnl pattern is valid")
});

static QTY_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:qty|quantity|shares|size)\s*[:=]\s*(?P<qty>[\d,]*\.?\d+)")
        .expect("quantity pattern is valid")
});

static SIDE_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?P<side>buy|sell|long|short)\b").expect("side pattern is valid"));

static SYMBOL_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?P<symbol>[A-Z]{1,6}(?:\.[A-Z]{1,2})?)\b").expect("symbol pattern is valid"));

static SUMMARY_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(?:total|summary|net)\b").expect("summary pattern is valid"));

/// Uppercase words that show up on trade lines but are never tickers.
const NOT_SYMBOLS: &[&str] = &[
    "BUY", "SELL", "LONG", "SHORT", "CLOSED", "CLOSE", "OPEN", "PNL", "P", "L", "QTY", "USD", "AM", "PM",
];

/// Parses a raw trading log into an `AnalysisRecord`.
///
/// Every line carrying a `pnl=`, `P&L:` or `realized:` field is one closed
/// trade. Summary lines (`Total ...`, `Summary ...`, `Net ...`) are skipped so
/// that a pasted footer does not double-count the day.
pub fn parse_trading_log(text: &str) -> Result<AnalysisRecord, ParseError> {
    if text.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let mut trades = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if SUMMARY_LINE.is_match(line) {
            continue;
        }
        if let Some(trade) = parse_trade_line(index + 1, line)? {
            trades.push(trade);
        }
    }

    if trades.is_empty() {
        return Err(ParseError::NoTrades);
    }

    tracing::debug!(trades = trades.len(), "Parsed trading log.");
    AnalysisRecord::from_trades(trades).map_err(|_| ParseError::TotalsOverflow)
}

fn parse_trade_line(line_no: usize, line: &str) -> Result<Option<ParsedTrade>, ParseError> {
    let Some(caps) = PNL_FIELD.captures(line) else {
        return Ok(None);
    };
    let pnl = parse_amount(line_no, &caps["amount"])?;

    let quantity = match QTY_FIELD.captures(line) {
        Some(q) => Some(parse_amount(line_no, &q["qty"])?),
        None => None,
    };

    let side = SIDE_WORD
        .captures(line)
        .and_then(|s| TradeSide::from_str(&s["side"]).ok());

    let symbol = SYMBOL_WORD
        .captures_iter(line)
        .map(|s| s["symbol"].to_string())
        .find(|s| !NOT_SYMBOLS.contains(&s.as_str()));

    Ok(Some(ParsedTrade { symbol, side, quantity, pnl }))
}

/// Reads amounts like `+125.50`, `-$40.00`, `$-40` or `1,250`.
fn parse_amount(line_no: usize, raw: &str) -> Result<Decimal, ParseError> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '$' && *c != ',')
        .collect();

    let negative = cleaned.matches('-').count() % 2 == 1;
    let digits = cleaned.trim_start_matches(['+', '-']);

    let value = Decimal::from_str(digits).map_err(|_| ParseError::InvalidNumber {
        line: line_no,
        value: raw.trim().to_string(),
    })?;
    Ok(if negative { -value } else { value })
}
