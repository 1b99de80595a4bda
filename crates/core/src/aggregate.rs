//! Aggregate views over one day of filings.
//!
//! The Postgres reporter computes these in SQL; the functions here are the
//! in-process equivalents used by the memory store and the tests.

use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

use crate::models::{RelationshipCount, Tickers, TotalTransaction, Transaction, TransactionType, TransactionTypeCount};

/// Row cap for the top buy / top sell rankings.
pub const TOP_LIMIT: usize = 20;

/// Filings published on `day` (UTC).
pub fn on_day(rows: &[Transaction], day: NaiveDate) -> impl Iterator<Item = &Transaction> {
    rows.iter().filter(move |t| t.notification_day() == day)
}

/// Count and value per transaction type, ordered by stored label ascending.
#[must_use]
pub fn type_counts<'a>(rows: impl IntoIterator<Item = &'a Transaction>) -> Vec<TransactionTypeCount> {
    let mut groups: BTreeMap<&'static str, TransactionTypeCount> = BTreeMap::new();
    for row in rows {
        let entry = groups
            .entry(row.transaction_type.as_str())
            .or_insert_with(|| TransactionTypeCount {
                transaction_type: row.transaction_type,
                transaction_count: 0,
                total_value: 0,
            });
        entry.transaction_count += 1;
        entry.total_value += row.value;
    }
    groups.into_values().collect()
}

/// Count and value per (relationship, type), largest summed value first.
#[must_use]
pub fn relationship_counts<'a>(
    rows: impl IntoIterator<Item = &'a Transaction>,
) -> Vec<RelationshipCount> {
    let mut groups: BTreeMap<(String, &'static str), RelationshipCount> = BTreeMap::new();
    for row in rows {
        let key = (row.relationship.clone(), row.transaction_type.as_str());
        let entry = groups.entry(key).or_insert_with(|| RelationshipCount {
            relationship: row.relationship.clone(),
            transaction_type: row.transaction_type,
            transaction_count: 0,
            total_value: 0,
        });
        entry.transaction_count += 1;
        entry.total_value += row.value;
    }

    let mut counts: Vec<RelationshipCount> = groups.into_values().collect();
    // stable sort keeps the key order for ties
    counts.sort_by(|a, b| b.total_value.cmp(&a.total_value));
    counts
}

/// Net value (buy total minus sale total) for every ticker with a buy or a sale.
///
/// A ticker that only sold nets to the negated sale total. Rows with an
/// unknown type contribute to neither side.
#[must_use]
pub fn net_totals<'a>(rows: impl IntoIterator<Item = &'a Transaction>) -> Vec<TotalTransaction> {
    let mut nets: BTreeMap<&'a str, i64> = BTreeMap::new();
    for row in rows {
        let signed = match row.transaction_type {
            TransactionType::Buy => row.value,
            TransactionType::Sale => -row.value,
            TransactionType::Unknown => continue,
        };
        *nets.entry(row.ticker.as_str()).or_insert(0) += signed;
    }

    nets.into_iter()
        .map(|(ticker, total_value)| TotalTransaction {
            ticker: ticker.to_string(),
            total_value,
        })
        .collect()
}

/// Largest net buyers first, capped at [`TOP_LIMIT`].
#[must_use]
pub fn top_buy<'a>(rows: impl IntoIterator<Item = &'a Transaction>) -> Vec<TotalTransaction> {
    let mut totals = net_totals(rows);
    totals.sort_by(|a, b| b.total_value.cmp(&a.total_value));
    totals.truncate(TOP_LIMIT);
    totals
}

/// Largest net sellers (most negative) first, capped at [`TOP_LIMIT`].
#[must_use]
pub fn top_sell<'a>(rows: impl IntoIterator<Item = &'a Transaction>) -> Vec<TotalTransaction> {
    let mut totals = net_totals(rows);
    totals.sort_by(|a, b| a.total_value.cmp(&b.total_value));
    totals.truncate(TOP_LIMIT);
    totals
}

/// Distinct tickers with at least one row of `transaction_type`, sorted.
#[must_use]
pub fn distinct_tickers<'a>(
    rows: impl IntoIterator<Item = &'a Transaction>,
    transaction_type: TransactionType,
) -> Tickers {
    let set: BTreeSet<&str> = rows
        .into_iter()
        .filter(|t| t.transaction_type == transaction_type)
        .map(|t| t.ticker.as_str())
        .collect();
    Tickers(set.into_iter().map(str::to_string).collect())
}
