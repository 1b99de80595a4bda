//! Aggregate views printed to stdout.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use insider_core::AppConfig;
use insider_data::ReportSource;
use insider_telegram::format::{
    relationship_message, top_message, type_count_message, TOP_BUY_TITLE, TOP_SELL_TITLE,
};

use super::{connect, resolve_day};

/// Arguments for the report command.
#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Notification day (YYYY-MM-DD), defaults to yesterday
    #[arg(long)]
    pub day: Option<NaiveDate>,
}

/// Prints all four aggregate views for one day.
///
/// # Errors
/// Returns an error if the database cannot be reached or a query fails.
pub async fn run_report(config: &AppConfig, args: ReportArgs) -> Result<()> {
    let day = resolve_day(args.day);
    let db = connect(&config.database).await?;
    let reports = db.repositories().reports;
    let base = config.finviz.base_url.as_str();

    println!("Insider filings notified on {day}\n");

    let counts = reports
        .transaction_type_counts(day)
        .await
        .context("failed to load transaction type counts")?;
    println!("{}\n", type_count_message(&counts));

    let relationships = reports
        .relationship_counts(day)
        .await
        .context("failed to load relationship counts")?;
    println!("{}\n", relationship_message(&relationships));

    let buys = reports.top_buy(day).await.context("failed to load top buy")?;
    let buy_tickers = reports
        .buy_tickers(day)
        .await
        .context("failed to load buy tickers")?;
    println!("{}\n", top_message(TOP_BUY_TITLE, &buys, &buy_tickers, base));

    let sells = reports.top_sell(day).await.context("failed to load top sell")?;
    let sale_tickers = reports
        .sale_tickers(day)
        .await
        .context("failed to load sale tickers")?;
    println!("{}", top_message(TOP_SELL_TITLE, &sells, &sale_tickers, base));

    db.close().await;
    Ok(())
}
