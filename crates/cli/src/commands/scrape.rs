//! Scrape without persistence.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;
use insider_core::AppConfig;
use insider_scraper::InsiderScraper;

/// Arguments for the scrape command.
#[derive(Args, Debug, Clone)]
pub struct ScrapeArgs {
    /// Print the batch as JSON
    #[arg(long)]
    pub json: bool,
}

/// Prints yesterday's filings, buys first.
///
/// # Errors
/// Returns an error if either listing cannot be fetched.
pub async fn run_scrape(config: &AppConfig, args: ScrapeArgs) -> Result<()> {
    let scraper =
        InsiderScraper::new(config.finviz.clone()).context("failed to build listing client")?;
    let batch = scraper
        .last_day_transactions(Utc::now())
        .await
        .context("failed to scrape insider listings")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&batch)?);
        return Ok(());
    }

    println!(
        "{:<8} {:<5} {:<28} {:<24} {:>14} {:>16}  NOTIFIED",
        "TICKER", "TYPE", "OWNER", "RELATIONSHIP", "SHARES", "VALUE ($)"
    );
    for t in &batch {
        println!(
            "{:<8} {:<5} {:<28} {:<24} {:>14} {:>16}  {}",
            t.ticker,
            t.transaction_type.to_string(),
            t.owner,
            t.relationship,
            t.shares,
            t.value,
            t.notification_date.format("%Y-%m-%d %H:%M")
        );
    }
    println!("\n{} filings", batch.len());
    Ok(())
}
