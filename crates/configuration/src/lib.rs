use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{AuthSettings, Config, DatabaseSettings, LoggingSettings, ServerSettings};

const ENV_PREFIX: &str = "TRADELOG";

/// Loads the application configuration from `config.toml` (if present) and the environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from("config.toml")
}

/// Loads the configuration from the given file, which may be missing.
///
/// Sources are layered: built-in defaults, then the file, then environment
/// variables such as `TRADELOG__SERVER__PORT=8080`. The result is validated
/// before it is returned.
pub fn load_config_from(path: &str) -> Result<Config, ConfigError> {
    let builder = with_defaults(config::Config::builder())?
        .add_source(config::File::with_name(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(path, "Configuration loaded.");
    Ok(config)
}

fn with_defaults(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
    Ok(builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000)?
        .set_default("database.max_connections", 10)?
        .set_default("auth.password", "")?
        .set_default("auth.session_ttl_minutes", 720)?
        .set_default("logging.directory", "logs")?
        .set_default("logging.file_prefix", "tradelog.log")?
        .set_default("logging.filter", "info,tradelog=debug")?)
}
