use crate::store::{NotesStore, TradingDataStore};
use crate::DbError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use core_types::{AnalysisRecord, DayMetadata, DayRecord};
use serde_json::Value as JsonValue;
use sqlx::postgres::PgPool;
use sqlx::types::Json;
use sqlx::FromRow;
use std::collections::BTreeMap;

/// The `DbRepository` provides a high-level, application-specific interface
/// to the database. It encapsulates all SQL queries and data access logic.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

/// A row fetched from the `trading_days` table.
#[derive(FromRow, Debug, Clone)]
struct DbTradingDay {
    trade_date: NaiveDate,
    analysis: Json<AnalysisRecord>,
    added_at: DateTime<Utc>,
}

impl From<DbTradingDay> for DayRecord {
    fn from(row: DbTradingDay) -> Self {
        DayRecord {
            date: row.trade_date,
            analysis: row.analysis.0,
            metadata: DayMetadata { added_at: row.added_at },
        }
    }
}

#[derive(FromRow, Debug, Clone)]
struct DbDayNote {
    trade_date: NaiveDate,
    notes: String,
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TradingDataStore for DbRepository {
    async fn get_all_days(&self) -> Result<Vec<DayRecord>, DbError> {
        let rows = sqlx::query_as::<_, DbTradingDay>(
            "SELECT trade_date, analysis, added_at FROM trading_days ORDER BY trade_date ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(DayRecord::from).collect())
    }

    async fn get_base_data(&self) -> Result<JsonValue, DbError> {
        let payload: Option<JsonValue> = sqlx::query_scalar("SELECT payload FROM base_data WHERE id = 1")
            .fetch_optional(&self.pool)
            .await?;
        Ok(payload.unwrap_or(JsonValue::Null))
    }

    async fn set_base_data(&self, data: JsonValue) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO base_data (id, payload, updated_at)
            VALUES (1, $1, NOW())
            ON CONFLICT (id) DO UPDATE SET payload = EXCLUDED.payload, updated_at = NOW()
            "#,
        )
        .bind(data)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Upserts a day: a second upload for the same date replaces the first.
    async fn add_daily_log(&self, entry: DayRecord) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO trading_days (trade_date, analysis, added_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (trade_date) DO UPDATE
            SET analysis = EXCLUDED.analysis, added_at = EXCLUDED.added_at
            "#,
        )
        .bind(entry.date)
        .bind(Json(&entry.analysis))
        .bind(entry.metadata.added_at)
        .execute(&self.pool)
        .await?;

        tracing::debug!(date = %entry.date, "Stored trading day.");
        Ok(())
    }
}

#[async_trait]
impl NotesStore for DbRepository {
    async fn get_all_notes(&self) -> Result<BTreeMap<NaiveDate, String>, DbError> {
        let rows = sqlx::query_as::<_, DbDayNote>("SELECT trade_date, notes FROM day_notes")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|r| (r.trade_date, r.notes)).collect())
    }

    async fn set_notes(&self, date: NaiveDate, notes: &str) -> Result<(), DbError> {
        if notes.trim().is_empty() {
            sqlx::query("DELETE FROM day_notes WHERE trade_date = $1")
                .bind(date)
                .execute(&self.pool)
                .await?;
            return Ok(());
        }

        sqlx::query(
            r#"
            INSERT INTO day_notes (trade_date, notes, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (trade_date) DO UPDATE SET notes = EXCLUDED.notes, updated_at = NOW()
            "#,
        )
        .bind(date)
        .bind(notes)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
