//! Router tests against the in-memory store.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use configuration::AuthSettings;
use database::{MemoryStore, TradingDataStore};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use web_server::{build_router, AppState};

const PASSWORD: &str = "letmein";

fn setup() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let auth = AuthSettings {
        password: PASSWORD.to_string(),
        session_ttl_minutes: 60,
    };
    let state = Arc::new(AppState::new(store.clone(), store.clone(), auth));
    (build_router(state), store)
}

async fn send(app: &Router, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn login(app: &Router) -> String {
    let (status, body) = send(app, "POST", "/api/auth/login", None, Some(json!({ "password": PASSWORD }))).await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_is_public() {
    let (app, _) = setup();
    let (status, _) = send(&app, "GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn data_routes_require_a_session() {
    let (app, _) = setup();
    let (status, body) = send(&app, "GET", "/api/quarters", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    let (status, _) = send(&app, "GET", "/api/days", Some("not-a-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let (app, _) = setup();
    let (status, _) = send(&app, "POST", "/api/auth/login", None, Some(json!({ "password": "nope" }))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_revokes_the_token() {
    let (app, _) = setup();
    let token = login(&app).await;

    let (status, _) = send(&app, "POST", "/api/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", "/api/days", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn uploaded_logs_flow_into_weeks_and_quarters() {
    let (app, store) = setup();
    let token = login(&app).await;

    let logs = [
        "Log 2023-12-28\nAAPL LONG qty=10 pnl=+40\nMSFT SHORT pnl=-15",
        "Log 2024-01-02\nNVDA pnl=120.50",
        "Log 2024-01-03\nTSLA pnl=-20.50",
    ];
    for text in logs {
        let (status, body) = send(&app, "POST", "/api/logs", Some(&token), Some(json!({ "text": text }))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(body["date"].is_string());
    }
    assert_eq!(store.get_all_days().await.unwrap().len(), 3);

    let (status, days) = send(&app, "GET", "/api/days", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(days[0]["date"], "2023-12-28");
    assert_eq!(days[2]["date"], "2024-01-03");

    let (_, weeks) = send(&app, "GET", "/api/weeks", Some(&token), None).await;
    let weeks = weeks.as_array().unwrap();
    assert_eq!(weeks.len(), 2);
    assert_eq!(weeks[0]["weekStart"], "2024-01-01");
    assert_eq!(weeks[1]["weekStart"], "2023-12-25");

    let (status, quarters) = send(&app, "GET", "/api/quarters", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let quarters = quarters.as_array().unwrap();
    assert_eq!(quarters.len(), 2);
    assert_eq!(quarters[0]["quarter"], "Q1");
    assert_eq!(quarters[0]["year"], 2024);
    assert_eq!(quarters[0]["quarterHeadline"]["totalPnl"], 100.0);
    assert_eq!(quarters[0]["display"]["pnlLabel"], "+$100.00");
    assert_eq!(quarters[0]["display"]["winRateGrade"], "neutral");
    assert_eq!(quarters[1]["quarter"], "Q4");
    assert_eq!(quarters[1]["year"], 2023);
    assert_eq!(quarters[1]["quarterHeadline"]["wins"], 1);
}

#[tokio::test]
async fn unparseable_logs_are_unprocessable() {
    let (app, store) = setup();
    let token = login(&app).await;

    let (status, body) = send(&app, "POST", "/api/logs", Some(&token), Some(json!({ "text": "just a note" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("No closed trades"));
    assert!(store.get_all_days().await.unwrap().is_empty());
}

#[tokio::test]
async fn aggregate_groups_posted_weeks() {
    let (app, _) = setup();
    let token = login(&app).await;

    let weeks = json!([
        { "weekStart": "2024-01-05", "days": [], "weekHeadline": { "totalPnl": 100, "totalTrades": 3, "wins": 2, "losses": 1 } },
        { "weekStart": "2024-03-20", "days": [], "weekHeadline": { "totalPnl": -50, "totalTrades": 2, "wins": 0, "losses": 2 } },
        { "weekStart": "garbage", "weekHeadline": { "totalPnl": 999 } }
    ]);
    let (status, quarters) = send(&app, "POST", "/api/quarters/aggregate", Some(&token), Some(weeks)).await;
    assert_eq!(status, StatusCode::OK);
    let quarters = quarters.as_array().unwrap();
    assert_eq!(quarters.len(), 1);
    assert_eq!(quarters[0]["quarterHeadline"]["totalPnl"], 50.0);
    assert_eq!(quarters[0]["weeks"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn notes_round_trip_by_date() {
    let (app, _) = setup();
    let token = login(&app).await;

    let (status, _) = send(
        &app,
        "PUT",
        "/api/notes/2024-02-12",
        Some(&token),
        Some(json!({ "notes": "cut winners early" })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, notes) = send(&app, "GET", "/api/notes", Some(&token), None).await;
    assert_eq!(notes["2024-02-12"], "cut winners early");
}

#[tokio::test]
async fn base_data_is_null_until_set() {
    let (app, store) = setup();
    let token = login(&app).await;

    let (_, body) = send(&app, "GET", "/api/base-data", Some(&token), None).await;
    assert_eq!(body, Value::Null);

    store.set_base_data(json!({ "account": "main" })).await.unwrap();
    let (_, body) = send(&app, "GET", "/api/base-data", Some(&token), None).await;
    assert_eq!(body["account"], "main");
}
