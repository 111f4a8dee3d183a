use analytics::{build_week_logs, group_weeks_by_quarter, HeadlineDisplay};
use clap::{Parser, Subcommand};
use comfy_table::Table;
use configuration::LoggingSettings;
use core_types::{DayRecord, Headline};
use database::TradingDataStore;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// The main entry point for the Tradelog application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load TRADELOG__* variables from a .env file when one exists
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();
    let config = configuration::load_config_from(&cli.config)?;
    let _log_guard = init_tracing(&config.logging);

    // Execute the appropriate command
    match cli.command {
        Commands::Serve => web_server::run_server(config).await,
        Commands::Import(args) => handle_import(args, &config).await,
        Commands::Report(args) => handle_report(args, &config).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Upload, parse and review daily trading logs.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file. A missing file is fine.
    #[arg(long, global = true, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API.
    Serve,
    /// Parse log files and store them as trading days.
    Import(ImportArgs),
    /// Print week and quarter rollups.
    Report(ReportArgs),
}

#[derive(Parser)]
struct ImportArgs {
    /// Raw trading log files, one day per file.
    files: Vec<PathBuf>,

    /// A JSON document to store as the base aggregate.
    #[arg(long)]
    base_data: Option<PathBuf>,
}

#[derive(Parser)]
struct ReportArgs {
    /// Log files to report on directly. Without files, the configured store is read.
    files: Vec<PathBuf>,

    /// Also print the per-week table.
    #[arg(long)]
    weeks: bool,
}

// ==============================================================================
// Logging
// ==============================================================================

/// Installs stdout and daily-rolling file logging. The returned guard must
/// live until exit so buffered file output is flushed.
fn init_tracing(settings: &LoggingSettings) -> tracing_appender::non_blocking::WorkerGuard {
    let file_appender = tracing_appender::rolling::daily(&settings.directory, &settings.file_prefix);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stdout))
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .init();

    guard
}

// ==============================================================================
// Import Command Logic
// ==============================================================================

async fn handle_import(args: ImportArgs, config: &configuration::Config) -> anyhow::Result<()> {
    if config.database.url.is_none() {
        tracing::warn!("No database.url configured; imported days will be discarded on exit.");
    }
    let state = web_server::build_state(config).await?;

    if let Some(path) = &args.base_data {
        let raw = tokio::fs::read_to_string(path).await?;
        let value: serde_json::Value = serde_json::from_str(&raw)?;
        state.store.set_base_data(value).await?;
        tracing::info!(path = %path.display(), "Base data stored.");
    }

    let progress_bar = ProgressBar::new(args.files.len() as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut failures = 0usize;
    for path in &args.files {
        progress_bar.set_message(path.display().to_string());
        match read_day(path).await {
            Ok(record) => {
                let date = record.date;
                state.store.add_daily_log(record).await?;
                tracing::debug!(%date, path = %path.display(), "Imported trading day.");
            }
            Err(e) => {
                failures += 1;
                tracing::warn!(path = %path.display(), error = %e, "Skipping log file.");
            }
        }
        progress_bar.inc(1);
    }

    progress_bar.finish_with_message("Import complete!");
    tracing::info!(imported = args.files.len() - failures, failures, "Import finished.");
    Ok(())
}

/// Reads and parses one log file into a day record.
async fn read_day(path: &Path) -> anyhow::Result<DayRecord> {
    let text = tokio::fs::read_to_string(path).await?;
    let date = log_parser::log_date_or_today(&text);
    let analysis = log_parser::parse_trading_log(&text)?;
    Ok(DayRecord::new(date, analysis))
}

// ==============================================================================
// Report Command Logic
// ==============================================================================

async fn handle_report(args: ReportArgs, config: &configuration::Config) -> anyhow::Result<()> {
    let days = if args.files.is_empty() {
        let state = web_server::build_state(config).await?;
        state.store.get_all_days().await?
    } else {
        // Later files win for the same date, matching the store's overwrite rule.
        let mut by_date = BTreeMap::new();
        for path in &args.files {
            match read_day(path).await {
                Ok(record) => {
                    by_date.insert(record.date, record);
                }
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "Skipping log file."),
            }
        }
        by_date.into_values().collect()
    };

    let weeks = build_week_logs(&days);
    if args.weeks {
        let mut table = headline_table("Week");
        for week in &weeks {
            table.add_row(headline_row(week.week_start.clone(), &week.week_headline));
        }
        println!("{table}");
    }

    let mut table = headline_table("Quarter");
    for quarter in group_weeks_by_quarter(&weeks) {
        let label = format!("{} {}", quarter.quarter, quarter.year);
        table.add_row(headline_row(label, &quarter.quarter_headline));
    }
    println!("{table}");
    Ok(())
}

fn headline_table(period: &str) -> Table {
    let mut table = Table::new();
    table.set_header(vec![period, "Trades", "Wins", "Losses", "Win rate", "P&L"]);
    table
}

fn headline_row(label: String, headline: &Headline) -> Vec<String> {
    let display = HeadlineDisplay::from(headline);
    vec![
        label,
        headline.total_trades.to_string(),
        headline.wins.to_string(),
        headline.losses.to_string(),
        format!("{}%", display.win_rate_pct),
        display.pnl_label,
    ]
}
