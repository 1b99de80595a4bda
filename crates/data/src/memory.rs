//! In-process store with the same guard and aggregate semantics as Postgres.
//!
//! Backs dry runs and tests. State lives behind one mutex so the marker read,
//! the guard check and the insert happen as a single step.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use insider_core::{
    aggregate, report_day, RelationshipCount, Tickers, TotalTransaction, Transaction,
    TransactionType, TransactionTypeCount,
};
use parking_lot::Mutex;
use tracing::{info, warn};

use crate::error::{Result, StoreError};
use crate::guard::already_processed;
use crate::store::{InsertOutcome, ReportSource, TransactionStore};

/// Marker value of a freshly migrated database.
#[must_use]
pub fn initial_marker() -> NaiveDate {
    DateTime::<Utc>::UNIX_EPOCH.date_naive()
}

#[derive(Debug)]
struct State {
    rows: Vec<Transaction>,
    marker: NaiveDate,
}

#[derive(Debug)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::with_marker(initial_marker())
    }

    /// Starts with the marker already pointing at `marker`.
    #[must_use]
    pub fn with_marker(marker: NaiveDate) -> Self {
        Self {
            state: Mutex::new(State {
                rows: Vec::new(),
                marker,
            }),
        }
    }

    /// Adds rows without touching the marker.
    pub fn seed(&self, rows: impl IntoIterator<Item = Transaction>) {
        self.state.lock().rows.extend(rows);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl TransactionStore for MemoryStore {
    async fn insert_transactions(
        &self,
        batch: &[Transaction],
        now: DateTime<Utc>,
    ) -> Result<InsertOutcome> {
        if batch.is_empty() {
            return Ok(InsertOutcome::empty());
        }

        let mut state = self.state.lock();
        if let Some(hit) = already_processed(batch, state.marker) {
            warn!(marker = %state.marker, ticker = %hit.ticker, "batch contains filings already processed");
            return Err(StoreError::AlreadyProcessed { day: state.marker });
        }

        state.rows.extend_from_slice(batch);
        let day = report_day(now);
        state.marker = day;

        let inserted = batch.len() as u64;
        info!(inserted, marker = %day, "stored batch in memory");
        Ok(InsertOutcome {
            inserted,
            marker: Some(day),
        })
    }

    async fn last_parse(&self) -> Result<NaiveDate> {
        Ok(self.state.lock().marker)
    }
}

#[async_trait]
impl ReportSource for MemoryStore {
    async fn transaction_type_counts(&self, day: NaiveDate) -> Result<Vec<TransactionTypeCount>> {
        let state = self.state.lock();
        Ok(aggregate::type_counts(aggregate::on_day(&state.rows, day)))
    }

    async fn relationship_counts(&self, day: NaiveDate) -> Result<Vec<RelationshipCount>> {
        let state = self.state.lock();
        Ok(aggregate::relationship_counts(aggregate::on_day(&state.rows, day)))
    }

    async fn top_buy(&self, day: NaiveDate) -> Result<Vec<TotalTransaction>> {
        let state = self.state.lock();
        Ok(aggregate::top_buy(aggregate::on_day(&state.rows, day)))
    }

    async fn top_sell(&self, day: NaiveDate) -> Result<Vec<TotalTransaction>> {
        let state = self.state.lock();
        Ok(aggregate::top_sell(aggregate::on_day(&state.rows, day)))
    }

    async fn buy_tickers(&self, day: NaiveDate) -> Result<Tickers> {
        let state = self.state.lock();
        Ok(aggregate::distinct_tickers(
            aggregate::on_day(&state.rows, day),
            TransactionType::Buy,
        ))
    }

    async fn sale_tickers(&self, day: NaiveDate) -> Result<Tickers> {
        let state = self.state.lock();
        Ok(aggregate::distinct_tickers(
            aggregate::on_day(&state.rows, day),
            TransactionType::Sale,
        ))
    }
}
