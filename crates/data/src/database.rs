//! Connection pool setup and schema migrations.

use std::time::Duration;

use insider_core::DatabaseConfig;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use tracing::info;

use crate::error::{Result, StoreError};
use crate::repositories::Repositories;

/// Handle to the Postgres pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Builds the pool and checks the server answers within the configured timeout.
    ///
    /// An explicit `url` wins over the discrete host/database/credential fields.
    ///
    /// # Errors
    /// Returns [`StoreError::Connect`] if the options are invalid or the ping
    /// fails, and [`StoreError::Timeout`] if it does not answer in time.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let options = connect_options(config)?;
        let timeout = Duration::from_secs(config.connect_timeout_secs);

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(timeout)
            .connect_lazy_with(options);

        match tokio::time::timeout(timeout, sqlx::query("SELECT 1").execute(&pool)).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => return Err(StoreError::Connect(e)),
            Err(_) => {
                return Err(StoreError::Timeout {
                    secs: config.connect_timeout_secs,
                })
            }
        }

        info!(
            max_connections = config.max_connections,
            "connected to database"
        );
        Ok(Self { pool })
    }

    /// Wraps an existing pool.
    #[must_use]
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the tables and seeds the marker row. Safe to re-run.
    ///
    /// # Errors
    /// Returns [`StoreError::Migrate`] if a migration fails.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("database schema up to date");
        Ok(())
    }

    #[must_use]
    pub fn repositories(&self) -> Repositories {
        Repositories::new(self.pool.clone())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn connect_options(config: &DatabaseConfig) -> Result<PgConnectOptions> {
    if let Some(url) = config.url.as_deref() {
        return url.parse().map_err(StoreError::Connect);
    }

    let (host, port) = config.host_and_port();
    Ok(PgConnectOptions::new()
        .host(&host)
        .port(port)
        .database(&config.database)
        .username(&config.username)
        .password(&config.password))
}
