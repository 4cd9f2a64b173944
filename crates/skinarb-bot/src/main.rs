//! skinarb - Entry Point
//!
//! Single run: fetch 500Casino and CSFloat listings, compare, print deals.

use anyhow::Result;
use clap::Parser;
use skinarb_bot::{AppConfig, Application, OutputFormat};
use tracing::{info, warn};

/// Finds skins listed cheaper on 500.casino than on CSFloat
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via SKINARB_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,

    /// Dotenv file with API_500_KEY, CSFLOAT_URL and BUX_RATE
    #[arg(long, default_value = "e.env")]
    env_file: String,

    /// Number of deals to print
    #[arg(short = 'n', long)]
    top: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Variables already in the environment are never overridden
    let env_file_loaded = dotenv::from_filename(&args.env_file).is_ok();
    let _ = dotenv::dotenv();

    let mut config = AppConfig::load(args.config.as_deref())?;

    skinarb_telemetry::init_logging(&config.telemetry.log_level)?;

    info!(
        env_file = %args.env_file,
        env_file_loaded,
        "Starting skinarb v{}",
        env!("CARGO_PKG_VERSION")
    );

    config.apply_env();
    if let Some(top) = args.top {
        config.report.top_n = top;
    }
    if let Some(format) = args.format {
        config.report.format = format;
    }

    for warning in config.validate()? {
        warn!(warning = %warning, "Configuration warning");
    }

    let app = Application::new(config)?;
    let output = app.run_and_render().await?;
    println!("{output}");

    Ok(())
}
