//! Per-day aggregate queries over stored filings.
//!
//! Every query is scoped to rows whose notification timestamp falls on the
//! requested UTC calendar day.

use async_trait::async_trait;
use chrono::NaiveDate;
use insider_core::{
    RelationshipCount, Tickers, TotalTransaction, TransactionType, TransactionTypeCount, TOP_LIMIT,
};
use sqlx::PgPool;

use crate::error::{Result, StoreError};
use crate::store::ReportSource;

const NET_BY_TICKER: &str = r"
    WITH buys AS (
        SELECT ticker, SUM(value) AS total
        FROM transactions
        WHERE (notification_date AT TIME ZONE 'UTC')::date = $1
          AND transaction_type = 'Buy'
        GROUP BY ticker
    ), sales AS (
        SELECT ticker, SUM(value) AS total
        FROM transactions
        WHERE (notification_date AT TIME ZONE 'UTC')::date = $1
          AND transaction_type = 'Sale'
        GROUP BY ticker
    )
    SELECT COALESCE(b.ticker, s.ticker) AS ticker,
           (COALESCE(b.total, 0) - COALESCE(s.total, 0))::BIGINT AS total_value
    FROM buys b
    FULL OUTER JOIN sales s ON b.ticker = s.ticker
";

/// Repository for the reporting views.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn ranked(
        &self,
        day: NaiveDate,
        order: &str,
        operation: &'static str,
    ) -> Result<Vec<TotalTransaction>> {
        let sql = format!("{NET_BY_TICKER} ORDER BY total_value {order}, ticker ASC LIMIT $2");
        let rows: Vec<(String, i64)> = sqlx::query_as(&sql)
            .bind(day)
            .bind(TOP_LIMIT as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::database(operation))?;

        Ok(rows
            .into_iter()
            .map(|(ticker, total_value)| TotalTransaction { ticker, total_value })
            .collect())
    }

    async fn tickers(
        &self,
        day: NaiveDate,
        transaction_type: TransactionType,
        operation: &'static str,
    ) -> Result<Tickers> {
        let rows: Vec<(String,)> = sqlx::query_as(
            r"
            SELECT DISTINCT ticker
            FROM transactions
            WHERE (notification_date AT TIME ZONE 'UTC')::date = $1
              AND transaction_type = $2
            ORDER BY ticker
            ",
        )
        .bind(day)
        .bind(transaction_type.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::database(operation))?;

        Ok(Tickers(rows.into_iter().map(|(ticker,)| ticker).collect()))
    }
}

#[async_trait]
impl ReportSource for ReportRepository {
    async fn transaction_type_counts(&self, day: NaiveDate) -> Result<Vec<TransactionTypeCount>> {
        let rows: Vec<(String, i64, i64)> = sqlx::query_as(
            r"
            SELECT transaction_type,
                   COUNT(*)::BIGINT AS transaction_count,
                   COALESCE(SUM(value), 0)::BIGINT AS total_value
            FROM transactions
            WHERE (notification_date AT TIME ZONE 'UTC')::date = $1
            GROUP BY transaction_type
            ORDER BY transaction_type
            ",
        )
        .bind(day)
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::database("transaction type counts"))?;

        Ok(rows
            .into_iter()
            .map(|(label, transaction_count, total_value)| TransactionTypeCount {
                transaction_type: TransactionType::from_label(&label),
                transaction_count,
                total_value,
            })
            .collect())
    }

    async fn relationship_counts(&self, day: NaiveDate) -> Result<Vec<RelationshipCount>> {
        let rows: Vec<(String, String, i64, i64)> = sqlx::query_as(
            r"
            SELECT relationship,
                   transaction_type,
                   COUNT(*)::BIGINT AS transaction_count,
                   COALESCE(SUM(value), 0)::BIGINT AS total_value
            FROM transactions
            WHERE (notification_date AT TIME ZONE 'UTC')::date = $1
            GROUP BY relationship, transaction_type
            ORDER BY total_value DESC, relationship, transaction_type
            ",
        )
        .bind(day)
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::database("relationship counts"))?;

        Ok(rows
            .into_iter()
            .map(
                |(relationship, label, transaction_count, total_value)| RelationshipCount {
                    relationship,
                    transaction_type: TransactionType::from_label(&label),
                    transaction_count,
                    total_value,
                },
            )
            .collect())
    }

    async fn top_buy(&self, day: NaiveDate) -> Result<Vec<TotalTransaction>> {
        self.ranked(day, "DESC", "top buy").await
    }

    async fn top_sell(&self, day: NaiveDate) -> Result<Vec<TotalTransaction>> {
        self.ranked(day, "ASC", "top sell").await
    }

    async fn buy_tickers(&self, day: NaiveDate) -> Result<Tickers> {
        self.tickers(day, TransactionType::Buy, "buy tickers").await
    }

    async fn sale_tickers(&self, day: NaiveDate) -> Result<Tickers> {
        self.tickers(day, TransactionType::Sale, "sale tickers").await
    }
}
