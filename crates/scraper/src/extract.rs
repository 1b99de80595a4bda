//! Insider listing row extraction.
//!
//! The listing is a single HTML table with one header row followed by one
//! row per filing. Column layout:
//!
//! | # | field | example |
//! |---|-------|---------|
//! | 1 | ticker | `NVDA` |
//! | 2 | owner | `Huang Jen Hsun` |
//! | 3 | relationship | `President and CEO` |
//! | 4 | transaction date | `Oct 14` |
//! | 5 | transaction type | `Sale` |
//! | 6 | cost | `181.02` |
//! | 7 | shares | `75,000` |
//! | 8 | value ($) | `13,576,500` |
//! | 9 | shares total | `71,339,264` |
//! | 10 | SEC form 4 (notification) | `Oct 15 09:17 PM` + link |
//!
//! Neither date carries a year, so the caller's year is appended before
//! parsing. A row failing any date or number is dropped whole; an
//! unrecognised type label is kept as [`TransactionType::Unknown`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use insider_core::{Transaction, TransactionType};
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::{debug, warn};

use crate::error::{Result, ScrapeError};

/// Data rows of the listing table (the first match is the header).
pub const ROW_SELECTOR: &str = "table.styled-table-new > tbody > tr";
const CELL_SELECTOR: &str = "td";
const LINK_SELECTOR: &str = "a";

/// `Oct 14` + year
pub const TRANSACTION_DATE_FORMAT: &str = "%b %d %Y";
/// `Oct 15 09:17 PM` + year
pub const NOTIFICATION_DATE_FORMAT: &str = "%b %d %I:%M %p %Y";

const CELL_COUNT: usize = 10;

/// Why a single row was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("expected {expected} cells, found {found}")]
    MissingCells { expected: usize, found: usize },

    #[error("{field}: cannot parse {value:?}: {reason}")]
    Field {
        field: &'static str,
        value: String,
        reason: String,
    },
}

impl RowError {
    fn field(field: &'static str, value: &str, reason: impl ToString) -> Self {
        Self::Field {
            field,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Trimmed cell texts of one listing row plus the filing link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    pub cells: Vec<String>,
    /// `href` of the anchor inside the notification cell
    pub filing_url: String,
}

impl RawRow {
    fn cell(&self, column: usize) -> &str {
        self.cells.get(column - 1).map_or("", String::as_str)
    }

    /// Parses the row into a transaction, injecting `year` into both dates.
    ///
    /// # Errors
    /// Returns the first field that fails to parse.
    pub fn parse(&self, year: i32) -> std::result::Result<Transaction, RowError> {
        if self.cells.len() < CELL_COUNT {
            return Err(RowError::MissingCells {
                expected: CELL_COUNT,
                found: self.cells.len(),
            });
        }

        let transaction_date = parse_transaction_date(self.cell(4), year)?;
        let notification_date = parse_notification_date(self.cell(10), year)?;
        let cost = parse_cost(self.cell(6))?;
        let shares = parse_count("shares", self.cell(7))?;
        let value = parse_count("value", self.cell(8))?;
        let shares_total = parse_count("shares_total", self.cell(9))?;

        Ok(Transaction {
            ticker: self.cell(1).to_string(),
            owner: self.cell(2).to_string(),
            relationship: self.cell(3).to_string(),
            transaction_date,
            transaction_type: TransactionType::from_label(self.cell(5)),
            cost,
            shares,
            value,
            shares_total,
            notification_date,
            url: self.filing_url.clone(),
        })
    }
}

fn parse_transaction_date(text: &str, year: i32) -> std::result::Result<NaiveDate, RowError> {
    NaiveDate::parse_from_str(&format!("{text} {year}"), TRANSACTION_DATE_FORMAT)
        .map_err(|e| RowError::field("transaction_date", text, e))
}

fn parse_notification_date(text: &str, year: i32) -> std::result::Result<DateTime<Utc>, RowError> {
    NaiveDateTime::parse_from_str(&format!("{text} {year}"), NOTIFICATION_DATE_FORMAT)
        .map(|dt| dt.and_utc())
        .map_err(|e| RowError::field("notification_date", text, e))
}

// Cost is never thousands-separated on the listing; a comma fails the row.
fn parse_cost(text: &str) -> std::result::Result<f64, RowError> {
    text.parse::<f64>()
        .map_err(|e| RowError::field("cost", text, e))
}

fn parse_count(field: &'static str, text: &str) -> std::result::Result<i64, RowError> {
    text.replace(',', "")
        .parse::<i64>()
        .map_err(|e| RowError::field(field, text, e))
}

fn selector(css: &'static str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector {
        selector: css,
        message: e.to_string(),
    })
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Reduces every data row of the listing to a [`RawRow`], header excluded.
///
/// # Errors
/// Returns an error only if a built-in selector fails to compile.
pub fn extract_rows(html: &str) -> Result<Vec<RawRow>> {
    let rows = selector(ROW_SELECTOR)?;
    let cells = selector(CELL_SELECTOR)?;
    let link = selector(LINK_SELECTOR)?;

    let document = Html::parse_document(html);
    let raw = document
        .select(&rows)
        .skip(1)
        .map(|row| {
            let tds: Vec<ElementRef<'_>> = row.select(&cells).collect();
            let filing_url = tds
                .get(CELL_COUNT - 1)
                .and_then(|td| td.select(&link).next())
                .and_then(|a| a.value().attr("href"))
                .unwrap_or_default()
                .to_string();
            RawRow {
                cells: tds.into_iter().map(text_of).collect(),
                filing_url,
            }
        })
        .collect();

    Ok(raw)
}

/// Extracts every parseable filing from the listing, in document order.
///
/// Rows that fail to parse are logged and skipped.
///
/// # Errors
/// Returns an error only if a built-in selector fails to compile.
pub fn extract_transactions(html: &str, year: i32) -> Result<Vec<Transaction>> {
    let rows = extract_rows(html)?;
    let total = rows.len();

    let mut transactions = Vec::with_capacity(total);
    for (index, row) in rows.iter().enumerate() {
        match row.parse(year) {
            Ok(tx) => transactions.push(tx),
            Err(e) => warn!(row = index + 1, ticker = row.cell(1), error = %e, "skipping listing row"),
        }
    }

    debug!(rows = total, parsed = transactions.len(), "extracted listing");
    Ok(transactions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const HEADER: &str = "<tr><td>Ticker</td><td>Owner</td><td>Relationship</td><td>Date</td><td>Transaction</td><td>Cost</td><td>#Shares</td><td>Value ($)</td><td>#Shares Total</td><td>SEC Form 4</td></tr>";

    fn row_html(cells: [&str; 10]) -> String {
        let mut html = String::from("<tr>");
        for (i, cell) in cells.iter().enumerate() {
            if i == 0 {
                html.push_str(&format!("<td><a href='quote.ashx?t={cell}'>{cell}</a></td>"));
            } else if i == 9 {
                html.push_str(&format!(
                    "<td><a href='http://www.sec.gov/Archives/edgar/data/{i}/form4.xml'>{cell}</a></td>"
                ));
            } else {
                html.push_str(&format!("<td>{cell}</td>"));
            }
        }
        html.push_str("</tr>");
        html
    }

    fn document(rows: &[String]) -> String {
        format!(
            "<html><body><table class=\"styled-table-new is-rounded\"><tbody>{HEADER}{}</tbody></table></body></html>",
            rows.join("")
        )
    }

    fn good_row(ticker: &str) -> String {
        row_html([
            ticker,
            "Huang Jen Hsun",
            "President and CEO",
            "Oct 14",
            "Sale",
            "181.02",
            "75,000",
            "13,576,500",
            "71,339,264",
            "Oct 15 09:17 PM",
        ])
    }

    #[test]
    fn test_well_formed_row_populates_all_fields() {
        let html = document(&[good_row("NVDA")]);
        let txs = extract_transactions(&html, 2026).unwrap();

        assert_eq!(txs.len(), 1);
        let tx = &txs[0];
        assert_eq!(tx.ticker, "NVDA");
        assert_eq!(tx.owner, "Huang Jen Hsun");
        assert_eq!(tx.relationship, "President and CEO");
        assert_eq!(tx.transaction_date, NaiveDate::from_ymd_opt(2026, 10, 14).unwrap());
        assert_eq!(tx.transaction_type, TransactionType::Sale);
        assert!((tx.cost - 181.02).abs() < f64::EPSILON);
        assert_eq!(tx.shares, 75_000);
        assert_eq!(tx.value, 13_576_500);
        assert_eq!(tx.shares_total, 71_339_264);
        assert_eq!(
            tx.notification_date,
            Utc.with_ymd_and_hms(2026, 10, 15, 21, 17, 0).unwrap()
        );
        assert_eq!(tx.url, "http://www.sec.gov/Archives/edgar/data/9/form4.xml");
    }

    #[test]
    fn test_header_only_yields_nothing() {
        let html = document(&[]);
        assert!(extract_transactions(&html, 2026).unwrap().is_empty());
    }

    #[test]
    fn test_bad_number_skips_only_that_row() {
        let broken = row_html([
            "BAD", "Owner", "CFO", "Oct 14", "Buy", "12.5", "1,0x0", "12,500", "10,000",
            "Oct 15 10:00 AM",
        ]);
        let html = document(&[good_row("AAA"), broken, good_row("CCC")]);

        let tickers: Vec<String> = extract_transactions(&html, 2026)
            .unwrap()
            .into_iter()
            .map(|t| t.ticker)
            .collect();
        assert_eq!(tickers, vec!["AAA", "CCC"]);
    }

    #[test]
    fn test_bad_date_skips_row() {
        let broken = row_html([
            "BAD", "Owner", "CFO", "Oct 14", "Buy", "12.5", "1,000", "12,500", "10,000",
            "yesterday",
        ]);
        let html = document(&[broken, good_row("OK")]);
        let txs = extract_transactions(&html, 2026).unwrap();
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].ticker, "OK");
    }

    #[test]
    fn test_comma_in_cost_skips_row() {
        let broken = row_html([
            "BRK", "Owner", "Director", "Oct 14", "Buy", "1,234.50", "10", "12,345", "100",
            "Oct 15 10:00 AM",
        ]);
        let html = document(&[broken]);
        assert!(extract_transactions(&html, 2026).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_type_keeps_row() {
        let odd = row_html([
            "OPT", "Owner", "Director", "Oct 14", "Option Exercise", "0.5", "1,000", "500",
            "2,000", "Oct 15 06:01 AM",
        ]);
        let html = document(&[odd]);
        let txs = extract_transactions(&html, 2026).unwrap();
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].transaction_type, TransactionType::Unknown);
    }

    #[test]
    fn test_short_row_is_skipped() {
        let html = document(&["<tr><td>ONLY</td><td>two</td></tr>".to_string(), good_row("OK")]);
        let txs = extract_transactions(&html, 2026).unwrap();
        assert_eq!(txs.len(), 1);
    }

    #[test]
    fn test_raw_row_parse_reports_field() {
        let row = RawRow {
            cells: vec![
                "X", "Owner", "CEO", "Oct 14", "Buy", "abc", "1", "1", "1", "Oct 15 10:00 AM",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            filing_url: String::new(),
        };

        match row.parse(2026) {
            Err(RowError::Field { field, value, .. }) => {
                assert_eq!(field, "cost");
                assert_eq!(value, "abc");
            }
            other => panic!("expected cost error, got {other:?}"),
        }
    }

    #[test]
    fn test_single_digit_day_and_hour() {
        assert_eq!(
            parse_transaction_date("Nov 2", 2026).unwrap(),
            NaiveDate::from_ymd_opt(2026, 11, 2).unwrap()
        );
        assert_eq!(
            parse_notification_date("Nov 3 9:05 AM", 2026).unwrap(),
            Utc.with_ymd_and_hms(2026, 11, 3, 9, 5, 0).unwrap()
        );
        assert_eq!(
            parse_notification_date("Nov 3 12:30 AM", 2026).unwrap(),
            Utc.with_ymd_and_hms(2026, 11, 3, 0, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_other_tables_are_ignored() {
        let html = format!(
            "<table class=\"other\"><tbody>{HEADER}{}</tbody></table>{}",
            good_row("NOPE"),
            document(&[good_row("YES")])
        );
        let txs = extract_transactions(&html, 2026).unwrap();
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].ticker, "YES");
    }
}
