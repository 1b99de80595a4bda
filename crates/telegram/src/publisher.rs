//! Publishes the three digest messages for one report day.

use chrono::{DateTime, NaiveDate, Utc};
use insider_core::report_day;
use insider_data::{ReportSource, StoreError};
use tracing::info;

use crate::client::MessageSink;
use crate::error::{PublishError, Result};
use crate::format::{top_message, type_count_message, TOP_BUY_TITLE, TOP_SELL_TITLE};

const TYPE_COUNT: &str = "transaction type count";
const TOP_BUY: &str = "top buy";
const TOP_SELL: &str = "top sell";

/// Reads aggregates from `R` and sends them through `S`.
pub struct Publisher<R, S> {
    source: R,
    sink: S,
    base_url: String,
}

impl<R: ReportSource, S: MessageSink> Publisher<R, S> {
    pub fn new(source: R, sink: S, base_url: impl Into<String>) -> Self {
        Self {
            source,
            sink,
            base_url: base_url.into(),
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Publishes the digest for the day before `now`.
    ///
    /// # Errors
    /// Stops at the first section that is empty, fails to load, or fails to send.
    pub async fn publish(&self, now: DateTime<Utc>) -> Result<()> {
        self.publish_day(report_day(now)).await
    }

    /// Sends the type-count summary, then top buys, then top sells.
    ///
    /// # Errors
    /// See [`Publisher::publish`].
    pub async fn publish_day(&self, day: NaiveDate) -> Result<()> {
        self.type_counts(day).await?;
        self.top_buy(day).await?;
        self.top_sell(day).await?;
        info!(%day, "digest published");
        Ok(())
    }

    async fn type_counts(&self, day: NaiveDate) -> Result<()> {
        let counts = self
            .source
            .transaction_type_counts(day)
            .await
            .map_err(|source| PublishError::Store {
                section: TYPE_COUNT,
                source,
            })?;
        if counts.is_empty() {
            return Err(PublishError::Empty(TYPE_COUNT));
        }
        self.deliver(TYPE_COUNT, &type_count_message(&counts)).await
    }

    async fn top_buy(&self, day: NaiveDate) -> Result<()> {
        let store_err = |source: StoreError| PublishError::Store {
            section: TOP_BUY,
            source,
        };
        let rows = self.source.top_buy(day).await.map_err(store_err)?;
        if rows.is_empty() {
            return Err(PublishError::Empty(TOP_BUY));
        }
        let tickers = self.source.buy_tickers(day).await.map_err(store_err)?;
        self.deliver(TOP_BUY, &top_message(TOP_BUY_TITLE, &rows, &tickers, &self.base_url))
            .await
    }

    async fn top_sell(&self, day: NaiveDate) -> Result<()> {
        let store_err = |source: StoreError| PublishError::Store {
            section: TOP_SELL,
            source,
        };
        let rows = self.source.top_sell(day).await.map_err(store_err)?;
        if rows.is_empty() {
            return Err(PublishError::Empty(TOP_SELL));
        }
        let tickers = self.source.sale_tickers(day).await.map_err(store_err)?;
        self.deliver(TOP_SELL, &top_message(TOP_SELL_TITLE, &rows, &tickers, &self.base_url))
            .await
    }

    async fn deliver(&self, section: &'static str, text: &str) -> Result<()> {
        self.sink
            .send(text)
            .await
            .map_err(|source| PublishError::Send { section, source })?;
        info!(section, "sent digest section");
        Ok(())
    }
}
