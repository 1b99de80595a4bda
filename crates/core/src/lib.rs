//! Core types for the insider transaction digest.
//!
//! This crate provides:
//! - The transaction model and aggregate view types
//! - Last-day windowing over notification timestamps
//! - In-process aggregate math matching the reporter queries
//! - Layered configuration loading

pub mod aggregate;
pub mod config;
pub mod config_loader;
pub mod models;
pub mod window;

pub use aggregate::TOP_LIMIT;
pub use config::{AppConfig, DatabaseConfig, FinvizConfig, TelegramConfig};
pub use config_loader::ConfigLoader;
pub use models::{
    RelationshipCount, Side, Tickers, TotalTransaction, Transaction, TransactionType,
    TransactionTypeCount,
};
pub use window::{last_day, report_day, window_bounds};
