use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use job_aggregator::{
    default_manifest, AggregatorConfig, Dashboard, JobAggregator, JsonPresenter, PageSize,
    Pagination, Presenter, TablePresenter,
};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "job-aggregator",
    about = "Aggregate permanent job listings from VMS feeds",
    version
)]
struct Cli {
    /// TOML configuration file (defaults to $JOB_AGGREGATOR_CONFIG or the built-in VMS presets)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one fetch cycle and render the result (default command)
    Fetch(FetchArgs),
    /// Print the column manifest as JSON
    Columns,
    /// Probe every configured source
    Check,
}

#[derive(clap::Args, Debug)]
struct FetchArgs {
    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,
    /// Rows per page: 10, 20, 50 or 100
    #[arg(long, default_value_t = 10)]
    page_size: usize,
    /// One-based page number
    #[arg(long, default_value_t = 1)]
    page: usize,
    /// Print the detail view under each row
    #[arg(long)]
    details: bool,
}

impl Default for FetchArgs {
    fn default() -> Self {
        Self {
            format: Format::Table,
            page_size: 10,
            page: 1,
            details: false,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Table,
    Json,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    match run(Cli::parse()).await {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = AggregatorConfig::load(cli.config.as_deref()).context("loading configuration")?;

    match cli.command.unwrap_or(Command::Fetch(FetchArgs::default())) {
        Command::Fetch(args) => fetch(config, args).await,
        Command::Columns => {
            let stdout = io::stdout();
            serde_json::to_writer_pretty(stdout.lock(), &default_manifest())?;
            println!();
            Ok(ExitCode::SUCCESS)
        }
        Command::Check => check(config).await,
    }
}

async fn fetch(config: AggregatorConfig, args: FetchArgs) -> anyhow::Result<ExitCode> {
    let size = PageSize::try_from(args.page_size)?;
    let pagination = Pagination::new(size, args.page.saturating_sub(1));

    info!("Starting job aggregator with {} sources", config.sources.len());
    let aggregator = Arc::new(JobAggregator::from_config(&config)?);
    let dashboard = Dashboard::new(aggregator);

    let snapshot = dashboard.refresh().await;
    let manifest = default_manifest();

    let stdout = io::stdout();
    let mut presenter: Box<dyn Presenter> = match args.format {
        Format::Table => Box::new(
            TablePresenter::new(stdout.lock(), pagination).with_details(args.details),
        ),
        Format::Json => Box::new(JsonPresenter::new(stdout.lock()).pretty(true)),
    };
    presenter.present(&manifest, snapshot.records())?;

    match snapshot.error() {
        Some(message) => {
            warn!("Displayed an empty result: {}", message);
            Ok(ExitCode::FAILURE)
        }
        None => Ok(ExitCode::SUCCESS),
    }
}

async fn check(config: AggregatorConfig) -> anyhow::Result<ExitCode> {
    let aggregator = JobAggregator::from_config(&config)?;
    let mut healthy = true;

    for (spec, health) in config.sources.iter().zip(aggregator.health_check().await) {
        match health {
            Ok(health) => {
                healthy &= health.reachable;
                println!(
                    "{:<16} {:<12} status={} {}ms{}",
                    spec.id,
                    if health.reachable { "reachable" } else { "unreachable" },
                    health.http_status.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string()),
                    health.response_time_ms,
                    health.error.map(|e| format!(" ({e})")).unwrap_or_default()
                );
            }
            Err(e) => {
                healthy = false;
                println!("{:<16} error: {}", spec.id, e);
            }
        }
    }

    Ok(if healthy { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
