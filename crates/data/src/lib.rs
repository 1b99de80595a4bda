//! Persistence and reporting for insider filings.
//!
//! This crate provides:
//! - `PostgreSQL` pool setup and embedded migrations
//! - The once-per-day ingestion guard backed by the last-parse marker
//! - Repositories for the guarded batch insert and the per-day aggregate views
//! - An in-memory store with the same semantics for dry runs and tests

pub mod database;
pub mod error;
pub mod guard;
pub mod memory;
pub mod repositories;
pub mod store;

pub use database::Database;
pub use error::{Result, StoreError};
pub use guard::already_processed;
pub use memory::MemoryStore;
pub use repositories::{ReportRepository, Repositories, TransactionRepository};
pub use store::{InsertOutcome, ReportSource, TransactionStore};
