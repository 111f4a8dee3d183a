use crate::error::DbError;
use async_trait::async_trait;
use chrono::NaiveDate;
use core_types::DayRecord;
use serde_json::Value;
use std::collections::BTreeMap;

/// Date-indexed persistence for uploaded trading days.
///
/// Implementations hold at most one record per `date`; adding a record for a
/// date that is already stored replaces it. Callers must not rely on the
/// order `get_all_days` returns.
#[async_trait]
pub trait TradingDataStore: Send + Sync {
    async fn get_all_days(&self) -> Result<Vec<DayRecord>, DbError>;

    /// The opaque base aggregate, or `Value::Null` when none was ever stored.
    async fn get_base_data(&self) -> Result<Value, DbError>;

    async fn set_base_data(&self, data: Value) -> Result<(), DbError>;

    async fn add_daily_log(&self, entry: DayRecord) -> Result<(), DbError>;
}

/// Free-text notes keyed by trading day.
#[async_trait]
pub trait NotesStore: Send + Sync {
    async fn get_all_notes(&self) -> Result<BTreeMap<NaiveDate, String>, DbError>;

    /// Stores the notes for a day. Blank notes remove the entry.
    async fn set_notes(&self, date: NaiveDate, notes: &str) -> Result<(), DbError>;
}
