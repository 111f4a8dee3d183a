use crate::{error::AppError, AppState};
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tokio::sync::RwLock;
use uuid::Uuid;

/// The session token of an authenticated request, placed in request extensions
/// by `require_session`.
#[derive(Debug, Clone, Copy)]
pub struct SessionToken(pub Uuid);

/// Issued bearer tokens and their expiry times.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, DateTime<Utc>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a fresh token valid for `ttl`.
    pub async fn issue(&self, ttl: Duration) -> (Uuid, DateTime<Utc>) {
        let token = Uuid::new_v4();
        let expires_at = Utc::now() + ttl;
        let mut sessions = self.sessions.write().await;
        // Expired entries are dropped whenever a new session is created.
        let now = Utc::now();
        sessions.retain(|_, expiry| *expiry > now);
        sessions.insert(token, expires_at);
        (token, expires_at)
    }

    pub async fn is_valid(&self, token: Uuid) -> bool {
        self.sessions
            .read()
            .await
            .get(&token)
            .is_some_and(|expiry| *expiry > Utc::now())
    }

    pub async fn revoke(&self, token: Uuid) {
        self.sessions.write().await.remove(&token);
    }
}

/// Compares a submitted password with the configured one in constant time.
pub fn password_matches(given: &str, expected: &str) -> bool {
    given.as_bytes().ct_eq(expected.as_bytes()).into()
}

/// Middleware guarding every data route: the request must carry
/// `Authorization: Bearer <token>` with a live session token.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
        .ok_or_else(|| AppError::Unauthorized("Missing or malformed bearer token".to_string()))?;

    if !state.sessions.is_valid(token).await {
        return Err(AppError::Unauthorized("Session expired or unknown".to_string()));
    }

    request.extensions_mut().insert(SessionToken(token));
    Ok(next.run(request).await)
}
