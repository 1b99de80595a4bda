use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use insider_core::config_loader::DEFAULT_CONFIG_PATH;
use insider_core::ConfigLoader;

mod commands;

use commands::{PublishArgs, ReportArgs, RunArgs, ScrapeArgs};

#[derive(Parser)]
#[command(name = "insider")]
#[command(about = "Daily digest of insider trading filings from finviz", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, global = true, env = "INSIDER_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape yesterday's filings, store them and publish the digest
    Run(RunArgs),
    /// Scrape and print yesterday's filings without storing them
    Scrape(ScrapeArgs),
    /// Print the aggregate views for one day
    Report(ReportArgs),
    /// Publish the digest for one day from stored filings
    Publish(PublishArgs),
    /// Create the schema and seed the last-parse marker
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ConfigLoader::load_from(&cli.config)
        .with_context(|| format!("failed to load config from {}", cli.config.display()))?;

    match cli.command {
        Commands::Run(args) => commands::run_digest(&config, args).await?,
        Commands::Scrape(args) => commands::run_scrape(&config, args).await?,
        Commands::Report(args) => commands::run_report(&config, args).await?,
        Commands::Publish(args) => commands::run_publish(&config, args).await?,
        Commands::Migrate => commands::run_migrate(&config).await?,
    }

    Ok(())
}
