//! Display-only figures. None of these are persisted; they are recomputed
//! every time a headline is rendered.

use core_types::Headline;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// Win rate in percent, `wins / (wins + losses) * 100`. Zero when no trade won or lost.
pub fn win_rate(wins: u32, losses: u32) -> Decimal {
    let decided = u64::from(wins) + u64::from(losses);
    if decided == 0 {
        return Decimal::ZERO;
    }
    Decimal::from(wins) * Decimal::ONE_HUNDRED / Decimal::from(decided)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WinRateGrade {
    Good,
    Neutral,
    Poor,
}

impl WinRateGrade {
    pub fn classify(rate_pct: Decimal) -> Self {
        if rate_pct >= Decimal::from(60) {
            WinRateGrade::Good
        } else if rate_pct >= Decimal::from(40) {
            WinRateGrade::Neutral
        } else {
            WinRateGrade::Poor
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PnlTone {
    Positive,
    Negative,
}

impl PnlTone {
    pub fn classify(pnl: Decimal) -> Self {
        if pnl >= Decimal::ZERO {
            PnlTone::Positive
        } else {
            PnlTone::Negative
        }
    }
}

/// Formats a monetary amount in dollars with an explicit sign and thousands
/// separators: `+$1,234.50`, `-$50.00`, `+$0.00`.
pub fn format_currency(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded < Decimal::ZERO { '-' } else { '+' };
    let plain = format!("{:.2}", rounded.abs());
    let (whole, cents) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{sign}${grouped}.{cents}")
}

/// Everything the dashboard shows next to a headline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadlineDisplay {
    pub win_rate_pct: Decimal,
    pub win_rate_grade: WinRateGrade,
    pub pnl_tone: PnlTone,
    pub pnl_label: String,
}

impl From<&Headline> for HeadlineDisplay {
    fn from(headline: &Headline) -> Self {
        let rate = win_rate(headline.wins, headline.losses);
        Self {
            win_rate_pct: rate.round_dp(2),
            win_rate_grade: WinRateGrade::classify(rate),
            pnl_tone: PnlTone::classify(headline.total_pnl),
            pnl_label: format_currency(headline.total_pnl),
        }
    }
}
