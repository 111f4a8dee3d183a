use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put},
    Router,
};
use configuration::{AuthSettings, Config};
use database::{DbRepository, MemoryStore, NotesStore, TradingDataStore};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod auth;
pub mod error;
pub mod handlers;

use auth::SessionStore;

/// The shared application state that all handlers can access.
pub struct AppState {
    pub store: Arc<dyn TradingDataStore>,
    pub notes: Arc<dyn NotesStore>,
    pub sessions: SessionStore,
    pub auth: AuthSettings,
}

impl AppState {
    pub fn new(store: Arc<dyn TradingDataStore>, notes: Arc<dyn NotesStore>, auth: AuthSettings) -> Self {
        Self {
            store,
            notes,
            sessions: SessionStore::new(),
            auth,
        }
    }
}

/// Builds the application router. Everything except health and login sits
/// behind the session check.
pub fn build_router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route("/api/auth/logout", post(handlers::logout))
        .route("/api/logs", post(handlers::upload_log))
        .route("/api/days", get(handlers::get_days))
        .route("/api/weeks", get(handlers::get_weeks))
        .route("/api/quarters", get(handlers::get_quarters))
        .route("/api/quarters/aggregate", post(handlers::aggregate_quarters))
        .route("/api/base-data", get(handlers::get_base_data))
        .route("/api/notes", get(handlers::get_notes))
        .route("/api/notes/:date", put(handlers::put_notes))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_session));

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/auth/login", post(handlers::login))
        .merge(protected)
        .with_state(state)
        .layer(cors)
        // Logs every incoming request.
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(1024 * 1024 * 5)) // Pasted logs stay well under 5MB
}

/// Picks the store backend from the configuration: PostgreSQL when a URL is
/// set, otherwise an in-memory store.
pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let state = match &config.database.url {
        Some(url) => {
            let pool = database::connect(url, config.database.max_connections).await?;
            database::run_migrations(&pool).await?;
            let repo = Arc::new(DbRepository::new(pool));
            AppState::new(repo.clone(), repo, config.auth.clone())
        }
        None => {
            tracing::warn!("No database.url configured; trading data will be kept in memory only.");
            let store = Arc::new(MemoryStore::new());
            AppState::new(store.clone(), store, config.auth.clone())
        }
    };
    Ok(Arc::new(state))
}

/// The main function to configure and run the web server.
pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let app = build_router(build_state(&config).await?);

    tracing::info!("Web server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
