//! Scrape orchestration: both listings, last-day filter, merged batch.

use chrono::{DateTime, Datelike, Utc};
use insider_core::{last_day, FinvizConfig, Side, Transaction};
use tracing::{info, warn};

use crate::client::FinvizClient;
use crate::error::Result;
use crate::extract::extract_transactions;

/// Scrapes the buy and sale listings configured at construction.
#[derive(Debug, Clone)]
pub struct InsiderScraper {
    client: FinvizClient,
    config: FinvizConfig,
}

impl InsiderScraper {
    /// Creates a scraper for the listing URLs in `config`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: FinvizConfig) -> Result<Self> {
        let client = FinvizClient::new(&config)?;
        Ok(Self { client, config })
    }

    fn listing_url(&self, side: Side) -> &str {
        match side {
            Side::Buy => &self.config.buy_listing_url,
            Side::Sale => &self.config.sale_listing_url,
        }
    }

    /// Fetches and extracts every parseable row of one listing.
    ///
    /// # Errors
    /// Returns an error labelled with `side` if the listing cannot be fetched.
    pub async fn fetch_side(&self, side: Side, year: i32) -> Result<Vec<Transaction>> {
        let body = self.client.fetch_listing(side, self.listing_url(side)).await?;
        let transactions = extract_transactions(&body, year)?;
        let (off_side, unknown) = off_side_counts(side, &transactions);
        if off_side > 0 {
            warn!(%side, off_side, unknown, "listing rows with another transaction type");
        }
        info!(%side, count = transactions.len(), "extracted listing rows");
        Ok(transactions)
    }

    /// Returns yesterday's buy filings followed by yesterday's sale filings.
    ///
    /// Both listings are fetched concurrently; a failure on either side
    /// aborts the whole scrape.
    ///
    /// # Errors
    /// Returns the first side-labelled fetch error.
    pub async fn last_day_transactions(&self, now: DateTime<Utc>) -> Result<Vec<Transaction>> {
        let year = now.year();
        let (buys, sales) = tokio::try_join!(
            self.fetch_side(Side::Buy, year),
            self.fetch_side(Side::Sale, year)
        )?;

        let mut batch = last_day(buys, now);
        let buy_count = batch.len();
        batch.extend(last_day(sales, now));

        info!(
            buys = buy_count,
            sales = batch.len() - buy_count,
            "last-day batch ready"
        );
        Ok(batch)
    }
}

/// Rows whose type differs from the listing's, and how many of those are unrecognised.
fn off_side_counts(side: Side, transactions: &[Transaction]) -> (usize, usize) {
    let expected = side.transaction_type();
    transactions
        .iter()
        .filter(|t| t.transaction_type != expected)
        .fold((0, 0), |(off, unknown), t| {
            (off + 1, unknown + usize::from(!t.transaction_type.is_known()))
        })
}
