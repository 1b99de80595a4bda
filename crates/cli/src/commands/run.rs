//! Full daily run: scrape, store, publish.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use clap::Args;
use insider_core::{AppConfig, Transaction};
use insider_data::{MemoryStore, TransactionStore};
use insider_scraper::InsiderScraper;
use insider_telegram::{MessageSink, Publisher, SendError, TelegramClient};
use tracing::{info, warn};

use super::connect;

/// Arguments for the run command.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Store in memory and print the messages instead of sending them
    #[arg(long)]
    pub dry_run: bool,
}

/// Prints messages instead of sending them.
pub struct StdoutSink;

#[async_trait]
impl MessageSink for StdoutSink {
    async fn send(&self, text: &str) -> Result<(), SendError> {
        println!("{text}\n");
        Ok(())
    }
}

/// Runs the daily job.
///
/// A batch the store has already seen ends the run early without publishing.
///
/// # Errors
/// Returns an error annotated with the failing stage.
pub async fn run_digest(config: &AppConfig, args: RunArgs) -> Result<()> {
    let now = Utc::now();
    let scraper =
        InsiderScraper::new(config.finviz.clone()).context("failed to build listing client")?;

    if args.dry_run {
        let batch = scrape(&scraper, now).await?;
        let store = Arc::new(MemoryStore::new());
        if !store_batch(store.as_ref(), &batch, now).await? {
            return Ok(());
        }
        let publisher = Publisher::new(store, StdoutSink, config.finviz.base_url.clone());
        publisher.publish(now).await.context("failed to publish digest")?;
        return Ok(());
    }

    let telegram = TelegramClient::new(&config.telegram).context("telegram is not configured")?;
    let db = connect(&config.database).await?;
    let repos = db.repositories();

    let batch = scrape(&scraper, now).await?;
    if store_batch(&repos.transactions, &batch, now).await? {
        let publisher = Publisher::new(repos.reports, telegram, config.finviz.base_url.clone());
        publisher.publish(now).await.context("failed to publish digest")?;
    }

    db.close().await;
    Ok(())
}

async fn scrape(scraper: &InsiderScraper, now: DateTime<Utc>) -> Result<Vec<Transaction>> {
    scraper
        .last_day_transactions(now)
        .await
        .context("failed to scrape insider listings")
}

/// Returns false when the batch was already processed.
async fn store_batch<S: TransactionStore + ?Sized>(
    store: &S,
    batch: &[Transaction],
    now: DateTime<Utc>,
) -> Result<bool> {
    match store.insert_transactions(batch, now).await {
        Ok(outcome) => {
            info!(inserted = outcome.inserted, "batch stored");
            Ok(true)
        }
        Err(e) if e.is_already_processed() => {
            warn!(error = %e, "skipping publish");
            Ok(false)
        }
        Err(e) => Err(e).context("failed to store transactions"),
    }
}
