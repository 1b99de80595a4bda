//! Insider trading listing scraper.
//!
//! This crate provides:
//! - Row extraction from the listing HTML with per-row failure isolation
//! - An HTTP client for the buy and sale listings
//! - The orchestrator producing yesterday's merged batch
//!
//! # Example
//!
//! ```ignore
//! use insider_core::FinvizConfig;
//! use insider_scraper::InsiderScraper;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let scraper = InsiderScraper::new(FinvizConfig::default())?;
//!     let batch = scraper.last_day_transactions(chrono::Utc::now()).await?;
//!     println!("{} filings yesterday", batch.len());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod extract;
pub mod orchestrator;

pub use client::FinvizClient;
pub use error::{Result, ScrapeError};
pub use extract::{extract_rows, extract_transactions, RawRow, RowError};
pub use orchestrator::InsiderScraper;
