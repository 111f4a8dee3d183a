use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] database::DbError),
    #[error("Parse error: {0}")]
    Parse(#[from] log_parser::ParseError),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal database error occurred".to_string(),
                )
            }
            AppError::Parse(parse_err) => {
                tracing::warn!(error = %parse_err, "Rejected trading log.");
                (StatusCode::UNPROCESSABLE_ENTITY, parse_err.to_string())
            }
            AppError::Unauthorized(message) => (StatusCode::UNAUTHORIZED, message),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
