//! Error types for persistence and reporting.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors from the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A filing in the batch was published on the day the marker already covers.
    ///
    /// Expected on re-runs; nothing was written.
    #[error("filings for {day} were already processed")]
    AlreadyProcessed { day: NaiveDate },

    /// The single last-parse row has not been seeded.
    #[error("last-parse marker row is missing")]
    MarkerMissing,

    /// A statement failed.
    #[error("{operation} failed: {source}")]
    Database {
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },

    /// The pool could not be configured or the first connection failed.
    #[error("database connection failed: {0}")]
    Connect(#[source] sqlx::Error),

    /// The startup ping did not answer in time.
    #[error("database ping timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

impl StoreError {
    /// Wraps a `sqlx` error with the name of the failing operation.
    pub fn database(operation: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| Self::Database { operation, source }
    }

    /// Returns true for the expected already-processed condition.
    #[must_use]
    pub fn is_already_processed(&self) -> bool {
        matches!(self, Self::AlreadyProcessed { .. })
    }
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_processed_display() {
        let err = StoreError::AlreadyProcessed {
            day: NaiveDate::from_ymd_opt(2026, 10, 15).unwrap(),
        };
        assert!(err.is_already_processed());
        assert_eq!(err.to_string(), "filings for 2026-10-15 were already processed");
    }

    #[test]
    fn test_database_error_names_operation() {
        let err = StoreError::database("select last parse")(sqlx::Error::RowNotFound);
        assert!(!err.is_already_processed());
        assert!(err.to_string().starts_with("select last parse failed"));
    }
}
