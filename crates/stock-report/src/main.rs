//! stock-report: score one ticker from a pre-fetched snapshot bundle.
//!
//! Usage:
//!   cargo run -p stock-report -- --input snapshots/INFY.json
//!   cargo run -p stock-report -- --input snapshots/INFY.json --format json --symbol INFY
//!
//! Environment: REPORT_FORMAT (text|json), REPORT_PRETTY, REPORT_SHOW_DETAILS,
//! RUST_LOG, RUST_LOG_FORMAT=json.

mod bundle;
mod config;
mod render;

use anyhow::Context;
use bundle::{ReportEnvelope, SnapshotBundle};
use config::{CliArgs, OutputFormat, ReportConfig};

const DEFAULT_LOG_FILTER: &str = "stock_report=info,analysis_orchestrator=info";

fn init_tracing() {
    let filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER))
    };
    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    // Logs go to stderr so stdout stays a clean report
    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter())
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        eprintln!("Usage: stock-report --input PATH [--format text|json] [--symbol SYM]");
        return Ok(());
    }

    let cli = CliArgs::parse(&args).context("Invalid command line")?;
    let mut config = ReportConfig::from_env().context("Invalid REPORT_* environment")?;
    cli.apply(&mut config);

    let bundle = SnapshotBundle::load(&cli.input)
        .with_context(|| format!("Failed to load snapshot bundle {}", cli.input.display()))?;
    let symbol = cli
        .symbol
        .clone()
        .or_else(|| bundle.symbol.clone())
        .unwrap_or_else(|| "UNKNOWN".to_string());

    tracing::info!(
        "Scoring {} (fundamentals: {}, technicals: {}, news items: {})",
        symbol,
        bundle.fundamentals.is_some(),
        bundle.technicals.is_some(),
        bundle.news.len()
    );

    let report = analysis_orchestrator::evaluate(
        bundle.fundamentals.as_ref(),
        bundle.technicals.as_ref(),
        &bundle.news,
    );

    match config.format {
        OutputFormat::Text => print!("{}", render::render_text(&symbol, &report, config.show_details)),
        OutputFormat::Json => {
            let envelope = ReportEnvelope::new(&symbol, &report);
            let json = if config.pretty {
                serde_json::to_string_pretty(&envelope)
            } else {
                serde_json::to_string(&envelope)
            }
            .context("Failed to serialize report")?;
            println!("{}", json);
        }
    }

    Ok(())
}
