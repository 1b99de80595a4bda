//! Last-day windowing.
//!
//! The listing returns the N most recent filings regardless of date, so
//! every scrape is narrowed to filings published during the previous
//! UTC calendar day.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::models::Transaction;

/// Returns `(from, to)` where `to` is today's 00:00 UTC and `from` is 24h earlier.
#[must_use]
pub fn window_bounds(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let to = now
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .map_or(now, |midnight| midnight.and_utc());
    (to - Duration::hours(24), to)
}

/// Keeps filings with `from < notification_date < to`.
///
/// Both bounds are exclusive: a filing stamped exactly at midnight belongs
/// to neither day.
#[must_use]
pub fn last_day(batch: Vec<Transaction>, now: DateTime<Utc>) -> Vec<Transaction> {
    let (from, to) = window_bounds(now);
    batch
        .into_iter()
        .filter(|t| t.notification_date > from && t.notification_date < to)
        .collect()
}

/// The day every report covers and the value the last-parse marker advances to.
#[must_use]
pub fn report_day(now: DateTime<Utc>) -> NaiveDate {
    let today = now.date_naive();
    today.pred_opt().unwrap_or(today)
}
