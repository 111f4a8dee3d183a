use crate::store::{NotesStore, TradingDataStore};
use crate::DbError;
use async_trait::async_trait;
use chrono::NaiveDate;
use core_types::DayRecord;
use serde_json::Value;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// A process-local store used when no database URL is configured, and in tests.
/// Contents are lost on restart.
#[derive(Debug)]
pub struct MemoryStore {
    days: RwLock<BTreeMap<NaiveDate, DayRecord>>,
    base_data: RwLock<Value>,
    notes: RwLock<BTreeMap<NaiveDate, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            days: RwLock::new(BTreeMap::new()),
            base_data: RwLock::new(Value::Null),
            notes: RwLock::new(BTreeMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TradingDataStore for MemoryStore {
    async fn get_all_days(&self) -> Result<Vec<DayRecord>, DbError> {
        Ok(self.days.read().await.values().cloned().collect())
    }

    async fn get_base_data(&self) -> Result<Value, DbError> {
        Ok(self.base_data.read().await.clone())
    }

    async fn set_base_data(&self, data: Value) -> Result<(), DbError> {
        *self.base_data.write().await = data;
        Ok(())
    }

    async fn add_daily_log(&self, entry: DayRecord) -> Result<(), DbError> {
        self.days.write().await.insert(entry.date, entry);
        Ok(())
    }
}

#[async_trait]
impl NotesStore for MemoryStore {
    async fn get_all_notes(&self) -> Result<BTreeMap<NaiveDate, String>, DbError> {
        Ok(self.notes.read().await.clone())
    }

    async fn set_notes(&self, date: NaiveDate, notes: &str) -> Result<(), DbError> {
        let mut map = self.notes.write().await;
        if notes.trim().is_empty() {
            map.remove(&date);
        } else {
            map.insert(date, notes.to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::AnalysisRecord;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn record(day: u32, pnl: rust_decimal::Decimal) -> DayRecord {
        let analysis = AnalysisRecord { total_pnl: pnl, total_trades: 1, ..AnalysisRecord::default() };
        DayRecord::new(NaiveDate::from_ymd_opt(2024, 2, day).unwrap(), analysis)
    }

    #[tokio::test]
    async fn adding_the_same_date_overwrites() {
        let store = MemoryStore::new();
        store.add_daily_log(record(12, dec!(10))).await.unwrap();
        store.add_daily_log(record(13, dec!(5))).await.unwrap();
        store.add_daily_log(record(12, dec!(-3))).await.unwrap();

        let days = store.get_all_days().await.unwrap();
        assert_eq!(days.len(), 2);
        let twelfth = days.iter().find(|d| d.date.format("%d").to_string() == "12").unwrap();
        assert_eq!(twelfth.analysis.total_pnl, dec!(-3));
    }

    #[tokio::test]
    async fn base_data_defaults_to_null() {
        let store = MemoryStore::new();
        assert_eq!(store.get_base_data().await.unwrap(), Value::Null);

        store.set_base_data(json!({ "startingBalance": 25000 })).await.unwrap();
        assert_eq!(store.get_base_data().await.unwrap()["startingBalance"], 25000);
    }

    #[tokio::test]
    async fn blank_notes_clear_the_entry() {
        let store = MemoryStore::new();
        let date = NaiveDate::from_ymd_opt(2024, 2, 12).unwrap();

        store.set_notes(date, "chased the open").await.unwrap();
        assert_eq!(store.get_all_notes().await.unwrap().get(&date).map(String::as_str), Some("chased the open"));

        store.set_notes(date, "").await.unwrap();
        assert!(store.get_all_notes().await.unwrap().is_empty());
    }
}
