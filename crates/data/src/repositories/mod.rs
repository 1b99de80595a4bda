//! Postgres repositories.
//!
//! `transactions` owns the guarded batch insert; `reports` owns the
//! per-day aggregate queries.

pub mod report_repo;
pub mod transaction_repo;

pub use report_repo::ReportRepository;
pub use transaction_repo::TransactionRepository;

use sqlx::PgPool;

/// Creates all repositories from a single database pool.
#[derive(Debug, Clone)]
pub struct Repositories {
    pub transactions: TransactionRepository,
    pub reports: ReportRepository,
}

impl Repositories {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            transactions: TransactionRepository::new(pool.clone()),
            reports: ReportRepository::new(pool),
        }
    }
}
