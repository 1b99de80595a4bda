//! CLI commands for the insider digest.

pub mod migrate;
pub mod publish;
pub mod report;
pub mod run;
pub mod scrape;

pub use migrate::run_migrate;
pub use publish::{run_publish, PublishArgs};
pub use report::{run_report, ReportArgs};
pub use run::{run_digest, RunArgs};
pub use scrape::{run_scrape, ScrapeArgs};

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use insider_core::{report_day, DatabaseConfig};
use insider_data::Database;

/// The requested day, or the day before now.
pub(crate) fn resolve_day(day: Option<NaiveDate>) -> NaiveDate {
    day.unwrap_or_else(|| report_day(Utc::now()))
}

pub(crate) async fn connect(config: &DatabaseConfig) -> Result<Database> {
    Database::connect(config)
        .await
        .context("failed to connect to database")
}
