//! Guarded batch insert of filings.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use insider_core::{report_day, Transaction};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{debug, info, warn};

use crate::error::{Result, StoreError};
use crate::guard::already_processed;
use crate::store::{InsertOutcome, TransactionStore};

/// Id of the single marker row.
pub const MARKER_ID: i32 = 1;

// Postgres caps a statement at 65535 bind parameters; 11 per row.
const INSERT_CHUNK: usize = 1000;

/// Repository for the `transactions` and `last_parse` tables.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: PgPool,
}

impl TransactionRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Number of stored filings.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM transactions")
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::database("count transactions"))?;
        Ok(count)
    }
}

#[async_trait]
impl TransactionStore for TransactionRepository {
    async fn insert_transactions(
        &self,
        batch: &[Transaction],
        now: DateTime<Utc>,
    ) -> Result<InsertOutcome> {
        if batch.is_empty() {
            debug!("empty batch, nothing to insert");
            return Ok(InsertOutcome::empty());
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(StoreError::database("begin transaction"))?;

        // Row lock serializes concurrent runs on the marker.
        let marker: Option<(NaiveDate,)> =
            sqlx::query_as("SELECT updated_at FROM last_parse WHERE id = $1 FOR UPDATE")
                .bind(MARKER_ID)
                .fetch_optional(&mut *tx)
                .await
                .map_err(StoreError::database("lock last parse"))?;
        let Some((marker,)) = marker else {
            return Err(StoreError::MarkerMissing);
        };

        if let Some(hit) = already_processed(batch, marker) {
            warn!(
                marker = %marker,
                ticker = %hit.ticker,
                "batch contains filings already processed"
            );
            // dropping `tx` rolls back and releases the lock
            return Err(StoreError::AlreadyProcessed { day: marker });
        }

        let mut inserted = 0;
        for chunk in batch.chunks(INSERT_CHUNK) {
            let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
                "INSERT INTO transactions (ticker, owner, relationship, transaction_date, \
                 transaction_type, cost, shares, value, shares_total, notification_date, url) ",
            );
            builder.push_values(chunk, |mut row, t| {
                row.push_bind(&t.ticker)
                    .push_bind(&t.owner)
                    .push_bind(&t.relationship)
                    .push_bind(t.transaction_date)
                    .push_bind(t.transaction_type.as_str())
                    .push_bind(t.cost)
                    .push_bind(t.shares)
                    .push_bind(t.value)
                    .push_bind(t.shares_total)
                    .push_bind(t.notification_date)
                    .push_bind(&t.url);
            });
            let result = builder
                .build()
                .execute(&mut *tx)
                .await
                .map_err(StoreError::database("insert transactions"))?;
            inserted += result.rows_affected();
        }

        let day = report_day(now);
        sqlx::query("UPDATE last_parse SET updated_at = $1 WHERE id = $2")
            .bind(day)
            .bind(MARKER_ID)
            .execute(&mut *tx)
            .await
            .map_err(StoreError::database("update last parse"))?;

        tx.commit()
            .await
            .map_err(StoreError::database("commit transaction"))?;

        info!(inserted, marker = %day, "stored batch");
        Ok(InsertOutcome {
            inserted,
            marker: Some(day),
        })
    }

    async fn last_parse(&self) -> Result<NaiveDate> {
        let marker: Option<(NaiveDate,)> =
            sqlx::query_as("SELECT updated_at FROM last_parse WHERE id = $1")
                .bind(MARKER_ID)
                .fetch_optional(&self.pool)
                .await
                .map_err(StoreError::database("select last parse"))?;
        marker.map(|(day,)| day).ok_or(StoreError::MarkerMissing)
    }
}
