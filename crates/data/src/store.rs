//! Storage seams used by the CLI and the publisher.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use insider_core::{RelationshipCount, Tickers, TotalTransaction, Transaction, TransactionTypeCount};

use crate::error::Result;

/// What a successful insert did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertOutcome {
    pub inserted: u64,
    /// New marker value; `None` when the batch was empty and nothing was touched.
    pub marker: Option<NaiveDate>,
}

impl InsertOutcome {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            inserted: 0,
            marker: None,
        }
    }
}

/// Guarded, all-or-nothing batch persistence.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Reads the marker, rejects the batch if any filing falls on the
    /// marker's day, otherwise inserts everything and advances the marker
    /// to the day before `now`.
    async fn insert_transactions(
        &self,
        batch: &[Transaction],
        now: DateTime<Utc>,
    ) -> Result<InsertOutcome>;

    /// Current marker value.
    async fn last_parse(&self) -> Result<NaiveDate>;
}

/// Aggregate views over one notification day.
#[async_trait]
pub trait ReportSource: Send + Sync {
    async fn transaction_type_counts(&self, day: NaiveDate) -> Result<Vec<TransactionTypeCount>>;
    async fn relationship_counts(&self, day: NaiveDate) -> Result<Vec<RelationshipCount>>;
    async fn top_buy(&self, day: NaiveDate) -> Result<Vec<TotalTransaction>>;
    async fn top_sell(&self, day: NaiveDate) -> Result<Vec<TotalTransaction>>;
    async fn buy_tickers(&self, day: NaiveDate) -> Result<Tickers>;
    async fn sale_tickers(&self, day: NaiveDate) -> Result<Tickers>;
}

#[async_trait]
impl<T: TransactionStore + ?Sized> TransactionStore for Arc<T> {
    async fn insert_transactions(
        &self,
        batch: &[Transaction],
        now: DateTime<Utc>,
    ) -> Result<InsertOutcome> {
        (**self).insert_transactions(batch, now).await
    }

    async fn last_parse(&self) -> Result<NaiveDate> {
        (**self).last_parse().await
    }
}

#[async_trait]
impl<T: ReportSource + ?Sized> ReportSource for Arc<T> {
    async fn transaction_type_counts(&self, day: NaiveDate) -> Result<Vec<TransactionTypeCount>> {
        (**self).transaction_type_counts(day).await
    }

    async fn relationship_counts(&self, day: NaiveDate) -> Result<Vec<RelationshipCount>> {
        (**self).relationship_counts(day).await
    }

    async fn top_buy(&self, day: NaiveDate) -> Result<Vec<TotalTransaction>> {
        (**self).top_buy(day).await
    }

    async fn top_sell(&self, day: NaiveDate) -> Result<Vec<TotalTransaction>> {
        (**self).top_sell(day).await
    }

    async fn buy_tickers(&self, day: NaiveDate) -> Result<Tickers> {
        (**self).buy_tickers(day).await
    }

    async fn sale_tickers(&self, day: NaiveDate) -> Result<Tickers> {
        (**self).sale_tickers(day).await
    }
}
