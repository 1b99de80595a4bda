use anyhow::{Context, Result};
use insider_core::AppConfig;

use super::connect;

/// Creates the schema and seeds the last-parse marker.
///
/// # Errors
/// Returns an error if the database cannot be reached or a migration fails.
pub async fn run_migrate(config: &AppConfig) -> Result<()> {
    let db = connect(&config.database).await?;
    db.migrate().await.context("failed to run migrations")?;
    db.close().await;
    Ok(())
}
