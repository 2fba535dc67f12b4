//! Box-office command line.
//!
//! ```text
//! cinema-tickets --account 1 ADULT:2 CHILD:1 INFANT:1
//! cinema-tickets --account 1 --dry-run --output json ADULT:3
//! ```

use anyhow::Context;
use cinema_tickets_cli::config::{Config, OutputFormat};
use cinema_tickets_cli::{run_purchase, ticket_service};
use cinema_tickets_runtime::metrics::MetricsRecorder;
use clap::Parser;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Validate, price and buy cinema tickets
#[derive(Debug, Parser)]
#[command(name = "cinema-tickets", version, about)]
struct Cli {
    /// Account to charge (positive integer)
    #[arg(short, long, allow_hyphen_values = true)]
    account: String,

    /// Line items as TYPE:COUNT, e.g. ADULT:2 CHILD:1
    tickets: Vec<String>,

    /// Validate and price only; no payment or reservation
    #[arg(long)]
    dry_run: bool,

    /// Output format, overriding OUTPUT_FORMAT
    #[arg(long, value_enum)]
    output: Option<OutputFormat>,

    /// Most tickets per purchase, overriding MAX_TICKETS_PER_PURCHASE
    #[arg(long)]
    max_tickets: Option<u32>,

    /// Print Prometheus metrics after the purchase (also METRICS_ENABLED=true)
    #[arg(long)]
    metrics: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    config
        .apply_overrides(cli.output, cli.max_tickets, cli.metrics)
        .context("Invalid configuration")?;

    // Logs go to stderr so stdout carries only the result
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!(
        max_tickets_per_purchase = config.max_tickets_per_purchase,
        output_format = %config.output_format,
        metrics_enabled = config.metrics_enabled,
        "Configuration loaded"
    );

    let mut recorder = MetricsRecorder::new();
    if config.metrics_enabled {
        recorder.install().context("Failed to install metrics recorder")?;
    }

    let service = ticket_service(&config);
    let completion = run_purchase(
        &service,
        &cli.account,
        &cli.tickets,
        cli.dry_run,
        config.output_format,
    )
    .context("Failed to render result")?;
    println!("{}", completion.output);

    if let Some(metrics) = recorder.render() {
        eprintln!("{metrics}");
    }

    Ok(ExitCode::from(completion.exit_code()))
}
