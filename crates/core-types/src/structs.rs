use crate::enums::{Quarter, TradeSide};
use crate::error::CoreError;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Deserializes a missing or `null` value as the type's zero value.
fn zero_if_null<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A single closed trade recovered from a raw log line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTrade {
    pub symbol: Option<String>,
    pub side: Option<TradeSide>,
    pub quantity: Option<Decimal>,
    pub pnl: Decimal,
}

/// The structured result of parsing one day's trading log.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_pnl: Decimal,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_trades: u32,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub wins: u32,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub losses: u32,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub gross_profit: Decimal,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub gross_loss: Decimal,
    #[serde(default)]
    pub trades: Vec<ParsedTrade>,
}

impl AnalysisRecord {
    /// Builds a record from closed trades. Zero-P&L trades count as trades but
    /// neither as wins nor losses.
    ///
    /// Fails with `CoreError::Overflow` when a total no longer fits.
    pub fn from_trades(trades: Vec<ParsedTrade>) -> Result<Self, CoreError> {
        let overflow = || CoreError::Overflow("trading log totals".to_string());
        let mut record = AnalysisRecord::default();
        for trade in &trades {
            record.total_pnl = record.total_pnl.checked_add(trade.pnl).ok_or_else(overflow)?;
            record.total_trades = record.total_trades.checked_add(1).ok_or_else(overflow)?;
            if trade.pnl > Decimal::ZERO {
                record.wins = record.wins.checked_add(1).ok_or_else(overflow)?;
                record.gross_profit = record.gross_profit.checked_add(trade.pnl).ok_or_else(overflow)?;
            } else if trade.pnl < Decimal::ZERO {
                record.losses = record.losses.checked_add(1).ok_or_else(overflow)?;
                record.gross_loss = record.gross_loss.checked_add(trade.pnl.abs()).ok_or_else(overflow)?;
            }
        }
        record.trades = trades;
        Ok(record)
    }

    pub fn headline(&self) -> Headline {
        Headline {
            total_pnl: self.total_pnl,
            total_trades: self.total_trades,
            wins: self.wins,
            losses: self.losses,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayMetadata {
    pub added_at: DateTime<Utc>,
}

/// One calendar day's trading analysis plus upload metadata.
/// A store holds at most one record per `date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRecord {
    pub date: NaiveDate,
    pub analysis: AnalysisRecord,
    pub metadata: DayMetadata,
}

impl DayRecord {
    pub fn new(date: NaiveDate, analysis: AnalysisRecord) -> Self {
        Self {
            date,
            analysis,
            metadata: DayMetadata { added_at: Utc::now() },
        }
    }
}

/// A numeric rollup at week or quarter granularity.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Headline {
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_pnl: Decimal,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_trades: u32,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub wins: u32,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub losses: u32,
}

impl Headline {
    /// Sums two headlines, or `None` if any figure would overflow.
    pub fn checked_add(&self, other: &Headline) -> Option<Headline> {
        Some(Headline {
            total_pnl: self.total_pnl.checked_add(other.total_pnl)?,
            total_trades: self.total_trades.checked_add(other.total_trades)?,
            wins: self.wins.checked_add(other.wins)?,
            losses: self.losses.checked_add(other.losses)?,
        })
    }
}

/// One week's summary plus its constituent days.
///
/// `week_start` stays a string: bucketing reads its year and month
/// components directly instead of going through a date type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekLog {
    pub week_start: String,
    #[serde(default)]
    pub days: Vec<DayRecord>,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub week_headline: Headline,
}

/// One quarter's summary plus its constituent weeks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarterData {
    pub quarter: Quarter,
    pub year: i32,
    pub weeks: Vec<WeekLog>,
    pub quarter_headline: Headline,
}

impl QuarterData {
    pub fn new(quarter: Quarter, year: i32) -> Self {
        Self {
            quarter,
            year,
            weeks: Vec::new(),
            quarter_headline: Headline::default(),
        }
    }

    /// Appends a week and folds its headline into the quarter totals.
    /// On overflow the quarter is left untouched and the week is handed back.
    pub fn push_week(&mut self, week: WeekLog) -> Result<(), WeekLog> {
        match self.quarter_headline.checked_add(&week.week_headline) {
            Some(total) => {
                self.quarter_headline = total;
                self.weeks.push(week);
                Ok(())
            }
            None => Err(week),
        }
    }
}
