//! Repository tests against a live database.
//!
//! Run with `DATABASE_URL=postgres://... cargo test -p insider-data -- --ignored`.
//! Each test works on a fresh schema so they can share one database.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use insider_core::{Transaction, TransactionType};
use insider_data::{Database, ReportSource, StoreError, TransactionStore};
use sqlx::postgres::PgPoolOptions;
use sqlx::Executor;

async fn fresh_database(schema: &str) -> Database {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let search_path = format!("SET search_path TO {schema}");
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .after_connect(move |conn, _meta| {
            let search_path = search_path.clone();
            Box::pin(async move {
                conn.execute(search_path.as_str()).await?;
                Ok(())
            })
        })
        .connect(&url)
        .await
        .expect("connect");

    pool.execute(format!("DROP SCHEMA IF EXISTS {schema} CASCADE").as_str())
        .await
        .unwrap();
    pool.execute(format!("CREATE SCHEMA {schema}").as_str())
        .await
        .unwrap();

    let db = Database::from_pool(pool);
    db.migrate().await.unwrap();
    db
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 8, 0, 0).unwrap()
}

fn filing(ticker: &str, kind: TransactionType, value: i64, day: u32, hour: u32) -> Transaction {
    Transaction {
        ticker: ticker.to_string(),
        owner: "Smith John".to_string(),
        relationship: "CEO".to_string(),
        transaction_date: NaiveDate::from_ymd_opt(2026, 10, 13).unwrap(),
        transaction_type: kind,
        cost: 12.34,
        shares: 1_000,
        value,
        shares_total: 50_000,
        notification_date: Utc.with_ymd_and_hms(2026, 10, day, hour, 30, 0).unwrap(),
        url: format!("http://www.sec.gov/Archives/{ticker}.xml"),
    }
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_insert_then_duplicate_run_is_rejected() {
    let db = fresh_database("insider_test_guard").await;
    let repos = db.repositories();
    let batch = vec![
        filing("AAPL", TransactionType::Buy, 10_000, 15, 9),
        filing("MSFT", TransactionType::Sale, 20_000, 15, 23),
    ];

    let outcome = repos.transactions.insert_transactions(&batch, now()).await.unwrap();
    assert_eq!(outcome.inserted, 2);
    assert_eq!(
        repos.transactions.last_parse().await.unwrap(),
        NaiveDate::from_ymd_opt(2026, 10, 15).unwrap()
    );

    let err = repos
        .transactions
        .insert_transactions(&batch, now())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::AlreadyProcessed { .. }));
    assert_eq!(repos.transactions.count().await.unwrap(), 2);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_empty_batch_leaves_marker_untouched() {
    let db = fresh_database("insider_test_empty").await;
    let repos = db.repositories();

    let outcome = repos.transactions.insert_transactions(&[], now()).await.unwrap();
    assert_eq!(outcome.inserted, 0);
    assert_eq!(
        repos.transactions.last_parse().await.unwrap(),
        NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()
    );
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_reports_match_day_and_net_ranking() {
    let db = fresh_database("insider_test_reports").await;
    let repos = db.repositories();
    let batch = vec![
        filing("AAPL", TransactionType::Buy, 500, 15, 1),
        filing("AAPL", TransactionType::Sale, 200, 15, 2),
        filing("MSFT", TransactionType::Sale, 900, 15, 3),
        filing("NVDA", TransactionType::Buy, 100, 15, 23),
        filing("TSLA", TransactionType::Buy, 5_000, 14, 12),
    ];
    repos.transactions.insert_transactions(&batch, now()).await.unwrap();
    let day = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();

    let counts = repos.reports.transaction_type_counts(day).await.unwrap();
    assert_eq!(counts.len(), 2);
    assert_eq!(counts[0].transaction_type, TransactionType::Buy);
    assert_eq!(counts[0].transaction_count, 2);
    assert_eq!(counts[0].total_value, 600);
    assert_eq!(counts[1].total_value, 1_100);

    let buys = repos.reports.top_buy(day).await.unwrap();
    let ranked: Vec<(&str, i64)> = buys.iter().map(|t| (t.ticker.as_str(), t.total_value)).collect();
    assert_eq!(ranked, vec![("AAPL", 300), ("NVDA", 100), ("MSFT", -900)]);

    let sells = repos.reports.top_sell(day).await.unwrap();
    assert_eq!(sells[0].ticker, "MSFT");

    assert_eq!(repos.reports.buy_tickers(day).await.unwrap().0, vec!["AAPL", "NVDA"]);
    assert_eq!(repos.reports.sale_tickers(day).await.unwrap().0, vec!["AAPL", "MSFT"]);

    let relationships = repos.reports.relationship_counts(day).await.unwrap();
    assert_eq!(relationships[0].relationship, "CEO");
    assert_eq!(relationships[0].total_value, 1_100);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_guard_match_late_in_batch_writes_nothing() {
    let db = fresh_database("insider_test_late_guard").await;
    let repos = db.repositories();
    let marker = NaiveDate::from_ymd_opt(2026, 10, 14).unwrap();
    sqlx::query("UPDATE last_parse SET updated_at = $1 WHERE id = 1")
        .bind(marker)
        .execute(db.pool())
        .await
        .unwrap();

    let batch = vec![
        filing("AAPL", TransactionType::Buy, 1_000, 15, 9),
        filing("MSFT", TransactionType::Buy, 2_000, 15, 10),
        filing("TSLA", TransactionType::Sale, 3_000, 14, 22),
    ];
    let err = repos
        .transactions
        .insert_transactions(&batch, now())
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::AlreadyProcessed { day } if day == marker));
    assert_eq!(repos.transactions.count().await.unwrap(), 0);
    assert_eq!(repos.transactions.last_parse().await.unwrap(), marker);
}
