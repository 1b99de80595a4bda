//! Message bodies for the daily digest.
//!
//! Messages use Telegram's HTML parse mode. Values are whole dollars.

use insider_core::{RelationshipCount, Tickers, TotalTransaction, TransactionTypeCount};

/// Header of the type-count summary.
pub const TYPE_COUNT_TITLE: &str = "<b>Transaction count and total_value (in $):</b>";
pub const TOP_BUY_TITLE: &str = "<b>Top 20 buy:</b>";
pub const TOP_SELL_TITLE: &str = "<b>Top 20 sell:</b>";
pub const RELATIONSHIP_TITLE: &str = "<b>By relationship (in $):</b>";

/// One line per transaction type: `Buy: 12 (3400000)`.
///
/// Types are printed by their stored label, so unrecognised rows read `: n (v)`.
#[must_use]
pub fn type_count_message(counts: &[TransactionTypeCount]) -> String {
    let mut lines = Vec::with_capacity(counts.len() + 1);
    lines.push(TYPE_COUNT_TITLE.to_string());
    for c in counts {
        lines.push(format!(
            "{}: {} ({})",
            c.transaction_type.as_str(),
            c.transaction_count,
            c.total_value
        ));
    }
    lines.join("\n")
}

/// Ranked tickers linked to their quote page, followed by the screener link.
#[must_use]
pub fn top_message(
    title: &str,
    rows: &[TotalTransaction],
    tickers: &Tickers,
    base_url: &str,
) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(title.to_string());
    for row in rows {
        lines.push(format!("{}: {}", row.quote_link(base_url), row.total_value));
    }
    if !tickers.is_empty() {
        lines.push(tickers.screener_link(base_url));
    }
    lines.join("\n")
}

#[must_use]
pub fn relationship_message(counts: &[RelationshipCount]) -> String {
    let mut lines = Vec::with_capacity(counts.len() + 1);
    lines.push(RELATIONSHIP_TITLE.to_string());
    for c in counts {
        lines.push(format!(
            "{} / {}: {} ({})",
            c.relationship, c.transaction_type, c.transaction_count, c.total_value
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use insider_core::TransactionType;

    const BASE: &str = "https://finviz.com";

    #[test]
    fn test_type_count_message() {
        let counts = vec![
            TransactionTypeCount {
                transaction_type: TransactionType::Buy,
                transaction_count: 3,
                total_value: 1_500_000,
            },
            TransactionTypeCount {
                transaction_type: TransactionType::Sale,
                transaction_count: 7,
                total_value: 92_445_414,
            },
        ];

        assert_eq!(
            type_count_message(&counts),
            "<b>Transaction count and total_value (in $):</b>\nBuy: 3 (1500000)\nSale: 7 (92445414)"
        );
    }

    #[test]
    fn test_type_count_message_prints_stored_label_for_unknown() {
        let counts = vec![
            TransactionTypeCount {
                transaction_type: TransactionType::Unknown,
                transaction_count: 2,
                total_value: 40,
            },
            TransactionTypeCount {
                transaction_type: TransactionType::Buy,
                transaction_count: 1,
                total_value: 10,
            },
        ];

        let text = type_count_message(&counts);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], ": 2 (40)");
        assert_eq!(lines[2], "Buy: 1 (10)");
        assert!(!text.contains("Unknown"));
    }

    #[test]
    fn test_top_message_links_every_ticker() {
        let rows = vec![
            TotalTransaction {
                ticker: "AAPL".to_string(),
                total_value: 900,
            },
            TotalTransaction {
                ticker: "MSFT".to_string(),
                total_value: -50,
            },
        ];
        let tickers = Tickers(vec!["AAPL".to_string(), "NVDA".to_string()]);

        let text = top_message(TOP_BUY_TITLE, &rows, &tickers, BASE);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], TOP_BUY_TITLE);
        assert_eq!(
            lines[1],
            "<a href='https://finviz.com/quote.ashx?t=AAPL'>AAPL</a>: 900"
        );
        assert!(lines[2].ends_with(": -50"));
        assert_eq!(
            lines[3],
            "<a href='https://finviz.com/screener.ashx?v=340&t=AAPL,NVDA&o=ticker'>Open ALL in Finviz Screener</a>"
        );
    }

    #[test]
    fn test_top_message_without_tickers_has_no_screener_link() {
        let rows = vec![TotalTransaction {
            ticker: "AAPL".to_string(),
            total_value: 1,
        }];
        let text = top_message(TOP_SELL_TITLE, &rows, &Tickers::default(), BASE);
        assert!(!text.contains("screener"));
    }

    #[test]
    fn test_relationship_message() {
        let counts = vec![RelationshipCount {
            relationship: "CEO".to_string(),
            transaction_type: TransactionType::Sale,
            transaction_count: 2,
            total_value: 40,
        }];
        assert_eq!(
            relationship_message(&counts),
            "<b>By relationship (in $):</b>\nCEO / Sale: 2 (40)"
        );
    }
}
