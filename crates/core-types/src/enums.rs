use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A calendar quarter. Declaration order is chronological, so `Q4 > Q1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    /// Maps a calendar month (1-12) to its quarter. Returns `None` outside that range.
    pub fn from_month(month: u32) -> Option<Self> {
        match month {
            1..=3 => Some(Quarter::Q1),
            4..=6 => Some(Quarter::Q2),
            7..=9 => Some(Quarter::Q3),
            10..=12 => Some(Quarter::Q4),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Quarter::Q1 => "Q1",
            Quarter::Q2 => "Q2",
            Quarter::Q3 => "Q3",
            Quarter::Q4 => "Q4",
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of a logged trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeSide {
    Long,
    Short,
}

impl FromStr for TradeSide {
    type Err = CoreError;

    /// Accepts the spellings found in broker exports: `BUY`/`LONG` and `SELL`/`SHORT`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUY" | "LONG" => Ok(TradeSide::Long),
            "SELL" | "SHORT" => Ok(TradeSide::Short),
            other => Err(CoreError::InvalidInput("trade side".to_string(), other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn months_map_to_quarters() {
        assert_eq!(Quarter::from_month(1), Some(Quarter::Q1));
        assert_eq!(Quarter::from_month(3), Some(Quarter::Q1));
        assert_eq!(Quarter::from_month(4), Some(Quarter::Q2));
        assert_eq!(Quarter::from_month(9), Some(Quarter::Q3));
        assert_eq!(Quarter::from_month(12), Some(Quarter::Q4));
        assert_eq!(Quarter::from_month(0), None);
        assert_eq!(Quarter::from_month(13), None);
    }

    #[test]
    fn quarters_order_chronologically() {
        assert!(Quarter::Q4 > Quarter::Q3);
        assert!(Quarter::Q2 > Quarter::Q1);
    }

    #[test]
    fn quarter_displays_its_label() {
        assert_eq!(Quarter::Q3.to_string(), "Q3");
        assert_eq!(Quarter::Q1.as_str(), "Q1");
    }

    #[test]
    fn trade_side_accepts_broker_spellings() {
        assert_eq!("buy".parse::<TradeSide>().unwrap(), TradeSide::Long);
        assert_eq!("SHORT".parse::<TradeSide>().unwrap(), TradeSide::Short);
        assert!("hold".parse::<TradeSide>().is_err());
    }
}
