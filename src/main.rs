//! kindred-climates CLI - compare the weather of two places over the same days.

use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;
use kindred_climates::config::LoggingConfig;
use kindred_climates::{
    ArchiveDirectoryClient, ClimateComparer, DateRange, GazetteerResolver, KindredConfig,
    LocationQuery,
};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "kindred-climates",
    version,
    about = "Compare the daily weather of two locations over the same date range"
)]
struct Cli {
    /// First location as "City, Region"
    #[arg(long, default_value = "Chattanooga, Tennessee")]
    first: LocationQuery,

    /// Second location as "City, Region"
    #[arg(long, default_value = "Austin, Texas")]
    second: LocationQuery,

    /// First day of the range (inclusive)
    #[arg(long, default_value = "2024-04-04")]
    start: NaiveDate,

    /// Last day of the range (inclusive)
    #[arg(long, default_value = "2024-04-13")]
    end: NaiveDate,

    /// Configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory of archived weather responses, overrides the configured one
    #[arg(long)]
    archive_dir: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(logging: &LoggingConfig) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match logging.format.as_str() {
        "json" => builder.json().try_init(),
        _ => builder.try_init(),
    }
    .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = KindredConfig::load_from_path(cli.config.clone())?;
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    if let Some(dir) = cli.archive_dir {
        config.archive.data_dir = dir;
    }
    init_logging(&config.logging)?;
    debug!("Archive directory: {}", config.archive.data_dir.display());

    let range = DateRange::new(cli.start, cli.end)?;
    let comparer = ClimateComparer::new(
        Arc::new(GazetteerResolver::new(config.locations.clone())),
        Arc::new(ArchiveDirectoryClient::new(config.archive.data_dir.clone())),
        config.similarity.scorer()?,
    );

    let comparison = comparer.compare(&cli.first, &cli.second, range).await;
    let errors = comparison.errors();

    let output = json!({
        "range": comparison.range,
        "first": comparison.first.as_ref().ok(),
        "second": comparison.second.as_ref().ok(),
        "similarity": comparison.similarity.as_ref().and_then(|s| s.as_ref().ok()),
        "chart": comparison.chart_overlay().and_then(|overlay| overlay.ok()),
        "errors": errors.iter().map(ToString::to_string).collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    if errors.is_empty() {
        return Ok(());
    }

    for e in &errors {
        error!("{}", e.user_message());
    }
    let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
    anyhow::bail!(messages.join("; "))
}
