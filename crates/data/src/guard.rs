//! Once-per-day ingestion guard.
//!
//! The whole batch is checked against the last-parse marker before any
//! insert statement is built, so a rejected batch never leaves a partial
//! write behind.

use chrono::NaiveDate;
use insider_core::Transaction;

/// Returns the first filing published on the marker's day, if any.
#[must_use]
pub fn already_processed(batch: &[Transaction], marker: NaiveDate) -> Option<&Transaction> {
    batch.iter().find(|t| t.notification_day() == marker)
}
