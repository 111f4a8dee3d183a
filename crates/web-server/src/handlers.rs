use crate::auth::{password_matches, SessionToken};
use crate::{error::AppError, AppState};
use analytics::{build_week_logs, group_weeks_by_quarter, HeadlineDisplay};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use core_types::{DayRecord, QuarterData, WeekLog};
use database::{NotesStore, TradingDataStore};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: Uuid,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct UploadLogRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct NotesRequest {
    pub notes: String,
}

/// A quarter rollup together with its display figures.
#[derive(Debug, Serialize)]
pub struct QuarterResponse {
    #[serde(flatten)]
    pub quarter: QuarterData,
    pub display: HeadlineDisplay,
}

/// # POST /api/auth/login
/// Exchanges the shared password for a session token.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if !password_matches(&request.password, &state.auth.password) {
        tracing::warn!("Rejected login attempt.");
        return Err(AppError::Unauthorized("Invalid password".to_string()));
    }

    let ttl = Duration::minutes(state.auth.session_ttl_minutes);
    let (token, expires_at) = state.sessions.issue(ttl).await;
    tracing::info!(%expires_at, "Session issued.");
    Ok(Json(LoginResponse { token, expires_at }))
}

/// # POST /api/auth/logout
pub async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(SessionToken(token)): Extension<SessionToken>,
) -> StatusCode {
    state.sessions.revoke(token).await;
    StatusCode::NO_CONTENT
}

/// # POST /api/logs
/// Parses a pasted trading log and stores it under the first date found in the
/// text (today's UTC date when there is none). Re-uploading a day replaces it.
pub async fn upload_log(
    State(state): State<Arc<AppState>>,
    Json(request): Json<UploadLogRequest>,
) -> Result<(StatusCode, Json<DayRecord>), AppError> {
    let date = log_parser::log_date_or_today(&request.text);
    let analysis = log_parser::parse_trading_log(&request.text)?;
    let record = DayRecord::new(date, analysis);

    state.store.add_daily_log(record.clone()).await?;
    tracing::info!(%date, trades = record.analysis.total_trades, "Trading log stored.");
    Ok((StatusCode::CREATED, Json(record)))
}

/// # GET /api/days
/// All stored days, oldest first.
pub async fn get_days(State(state): State<Arc<AppState>>) -> Result<Json<Vec<DayRecord>>, AppError> {
    let mut days = state.store.get_all_days().await?;
    days.sort_by_key(|d| d.date);
    Ok(Json(days))
}

/// # GET /api/weeks
pub async fn get_weeks(State(state): State<Arc<AppState>>) -> Result<Json<Vec<WeekLog>>, AppError> {
    let days = state.store.get_all_days().await?;
    Ok(Json(build_week_logs(&days)))
}

/// # GET /api/quarters
/// Quarter rollups over the stored weeks, newest first, with display figures.
pub async fn get_quarters(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<QuarterResponse>>, AppError> {
    let days = state.store.get_all_days().await?;
    let weeks = build_week_logs(&days);
    let quarters = group_weeks_by_quarter(&weeks)
        .into_iter()
        .map(|quarter| {
            let display = HeadlineDisplay::from(&quarter.quarter_headline);
            QuarterResponse { quarter, display }
        })
        .collect();
    Ok(Json(quarters))
}

/// # POST /api/quarters/aggregate
/// Groups caller-supplied weeks into quarters without touching the store.
pub async fn aggregate_quarters(Json(weeks): Json<Vec<WeekLog>>) -> Json<Vec<QuarterData>> {
    Json(group_weeks_by_quarter(&weeks))
}

/// # GET /api/base-data
pub async fn get_base_data(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    Ok(Json(state.store.get_base_data().await?))
}

/// # GET /api/notes
pub async fn get_notes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BTreeMap<NaiveDate, String>>, AppError> {
    Ok(Json(state.notes.get_all_notes().await?))
}

/// # PUT /api/notes/:date
pub async fn put_notes(
    Path(date): Path<NaiveDate>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<NotesRequest>,
) -> Result<StatusCode, AppError> {
    state.notes.set_notes(date, &request.notes).await?;
    Ok(StatusCode::NO_CONTENT)
}
