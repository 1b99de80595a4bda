//! Publish the digest from stored filings.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use insider_core::AppConfig;
use insider_telegram::{Publisher, TelegramClient};

use super::{connect, resolve_day};

/// Arguments for the publish command.
#[derive(Args, Debug, Clone)]
pub struct PublishArgs {
    /// Notification day (YYYY-MM-DD), defaults to yesterday
    #[arg(long)]
    pub day: Option<NaiveDate>,
}

/// Sends the three digest messages for one day.
///
/// # Errors
/// Returns an error if telegram is not configured, a section is empty, or a
/// query or send fails.
pub async fn run_publish(config: &AppConfig, args: PublishArgs) -> Result<()> {
    let day = resolve_day(args.day);
    let telegram = TelegramClient::new(&config.telegram).context("telegram is not configured")?;
    let db = connect(&config.database).await?;

    let publisher = Publisher::new(
        db.repositories().reports,
        telegram,
        config.finviz.base_url.clone(),
    );
    publisher
        .publish_day(day)
        .await
        .context("failed to publish digest")?;

    db.close().await;
    Ok(())
}
