use crate::error::ConfigError;
use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    pub logging: LoggingSettings,
}

/// Where the HTTP API listens.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Connection settings for PostgreSQL.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// When unset, the application keeps its data in memory.
    pub url: Option<String>,
    pub max_connections: u32,
}

/// The login gate in front of the API.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    /// The shared password exchanged for a session token.
    pub password: String,
    /// How long an issued session token stays valid.
    pub session_ttl_minutes: i64,
}

/// Where and how much the application logs.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// Directory for the daily-rolling log files.
    pub directory: String,
    pub file_prefix: String,
    /// Default `EnvFilter` directive, overridden by `RUST_LOG`.
    pub filter: String,
}

impl Config {
    /// Rejects settings the application cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError("server.port must be non-zero".to_string()));
        }
        if self.auth.password.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "auth.password must be set (TRADELOG__AUTH__PASSWORD)".to_string(),
            ));
        }
        if self.auth.session_ttl_minutes <= 0 {
            return Err(ConfigError::ValidationError(
                "auth.session_ttl_minutes must be positive".to_string(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::ValidationError(
                "database.max_connections must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
