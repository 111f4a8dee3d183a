use tracing_subscriber::EnvFilter;

// This main function is the entry point when running `cargo run -p web-server`.
// The full CLI (with file logging) lives in the root `tradelog` binary.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = configuration::load_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .init();

    web_server::run_server(config).await
}
