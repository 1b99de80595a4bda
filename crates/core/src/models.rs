//! Insider transaction data model.
//!
//! Mirrors one row of the insider trading listing plus the derived
//! aggregate views the reporter produces.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of an insider filing.
///
/// Listing text that is neither `Buy` nor `Sale` maps to `Unknown`
/// instead of failing the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TransactionType {
    Buy,
    Sale,
    Unknown,
}

impl TransactionType {
    /// Exact, case-sensitive lookup of the listing label.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "Buy" => Self::Buy,
            "Sale" => Self::Sale,
            _ => Self::Unknown,
        }
    }

    /// Returns the label stored in the `transaction_type` column.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "Buy",
            Self::Sale => "Sale",
            Self::Unknown => "",
        }
    }

    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => f.write_str("Unknown"),
            known => f.write_str(known.as_str()),
        }
    }
}

/// Which listing a batch came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sale,
}

impl Side {
    /// The transaction type every row of this listing is expected to carry.
    #[must_use]
    pub fn transaction_type(&self) -> TransactionType {
        match self {
            Self::Buy => TransactionType::Buy,
            Self::Sale => TransactionType::Sale,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => f.write_str("buy"),
            Self::Sale => f.write_str("sale"),
        }
    }
}

/// One insider filing as published on the listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Ticker symbol (e.g., "AAPL")
    pub ticker: String,
    /// Insider name
    pub owner: String,
    /// Insider role (e.g., "CEO", "10% Owner")
    pub relationship: String,
    /// Calendar date of the trade
    pub transaction_date: NaiveDate,
    pub transaction_type: TransactionType,
    /// Price per share
    pub cost: f64,
    pub shares: i64,
    /// Total dollar value of the trade
    pub value: i64,
    /// Shares held after the trade
    pub shares_total: i64,
    /// When the SEC filing was published. Drives all "last day" logic.
    pub notification_date: DateTime<Utc>,
    /// Link to the originating filing
    pub url: String,
}

impl Transaction {
    /// Calendar day (UTC) the filing was published.
    #[must_use]
    pub fn notification_day(&self) -> NaiveDate {
        self.notification_date.date_naive()
    }
}

/// Row count and summed value per transaction type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionTypeCount {
    pub transaction_type: TransactionType,
    pub transaction_count: i64,
    pub total_value: i64,
}

/// Row count and summed value per (relationship, transaction type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipCount {
    pub relationship: String,
    pub transaction_type: TransactionType,
    pub transaction_count: i64,
    pub total_value: i64,
}

/// Net traded value for one ticker: buy total minus sale total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalTransaction {
    pub ticker: String,
    pub total_value: i64,
}

impl TotalTransaction {
    /// HTML anchor to the ticker's quote page.
    #[must_use]
    pub fn quote_link(&self, base_url: &str) -> String {
        format!(
            "<a href='{}/quote.ashx?t={}'>{}</a>",
            base_url.trim_end_matches('/'),
            self.ticker,
            self.ticker
        )
    }
}

/// Distinct tickers seen on the report day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tickers(pub Vec<String>);

impl Tickers {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// HTML anchor opening every ticker at once in the screener.
    #[must_use]
    pub fn screener_link(&self, base_url: &str) -> String {
        format!(
            "<a href='{}/screener.ashx?v=340&t={}&o=ticker'>Open ALL in Finviz Screener</a>",
            base_url.trim_end_matches('/'),
            self.0.join(",")
        )
    }
}

impl From<Vec<String>> for Tickers {
    fn from(tickers: Vec<String>) -> Self {
        Self(tickers)
    }
}
