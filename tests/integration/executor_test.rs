//! Query execution against seeded SQLite fixtures.

use super::Fixture;
use pretty_assertions::assert_eq;
use pulse_insights::catalog::resolve;
use pulse_insights::config::ConnectionConfig;
use pulse_insights::db::{DatabaseBackend, Value};
use pulse_insights::error::DashboardError;
use pulse_insights::query::QueryExecutor;
use pulse_insights::selection::{HomeView, Quarter, Selection};
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::test]
async fn test_every_selection_executes() {
    let fixture = Fixture::sample();
    let executor = QueryExecutor::new(&fixture.connection, TIMEOUT);

    for selection in Selection::all() {
        let table = executor
            .execute(&resolve(selection))
            .await
            .unwrap_or_else(|e| panic!("{selection}: {e}"));
        assert!(table.columns.len() >= 2, "{selection}");
        assert_eq!(table.row_count, table.rows.len(), "{selection}");
    }
}

#[tokio::test]
async fn test_state_wise_trends_filters_by_quarter() {
    let fixture = Fixture::sample();
    let executor = QueryExecutor::new(&fixture.connection, TIMEOUT);

    let q3 = resolve(Selection::Home {
        view: HomeView::StateWiseTrends(Quarter::try_from(3).unwrap()),
    });
    let table = executor.execute(&q3).await.unwrap();

    let mut states: Vec<String> = table.rows.iter().map(|r| r[0].to_display_string()).collect();
    states.sort();
    assert_eq!(states, vec!["goa", "kerala"]);

    let q2 = resolve(Selection::Home {
        view: HomeView::StateWiseTrends(Quarter::try_from(2).unwrap()),
    });
    assert!(executor.execute(&q2).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_repeated_calls_return_identical_results() {
    let fixture = Fixture::sample();
    let executor = QueryExecutor::new(&fixture.connection, TIMEOUT);
    let query = resolve(Selection::Home {
        view: HomeView::CategoryInsights,
    });

    let first = executor.execute(&query).await.unwrap();
    let second = executor.execute(&query).await.unwrap();
    assert_eq!(first.rows, second.rows);
}

#[tokio::test]
async fn test_transaction_overview_keeps_database_order() {
    let fixture = Fixture::sample();
    let executor = QueryExecutor::new(&fixture.connection, TIMEOUT);

    let table = executor
        .execute(&resolve(Selection::default()))
        .await
        .unwrap();

    assert_eq!(table.column_names(), vec!["year", "quarter", "total_amount"]);
    let keys: Vec<(Value, Value)> = table
        .rows
        .iter()
        .map(|r| (r[0].clone(), r[1].clone()))
        .collect();
    assert_eq!(
        keys,
        vec![
            (Value::Int(2022), Value::Int(1)),
            (Value::Int(2022), Value::Int(3)),
            (Value::Int(2023), Value::Int(3)),
        ]
    );
}

#[tokio::test]
async fn test_missing_database_file() {
    let connection = ConnectionConfig {
        backend: DatabaseBackend::Sqlite,
        path: Some("/nonexistent/phonepe.db".into()),
        ..Default::default()
    };
    let executor = QueryExecutor::new(&connection, TIMEOUT);

    let err = executor
        .execute(&resolve(Selection::default()))
        .await
        .unwrap_err();
    assert!(matches!(err, DashboardError::Connection(_)));
}

#[tokio::test]
async fn test_mysql_end_to_end() {
    let Ok(url) = std::env::var("PULSE_TEST_MYSQL_URL") else {
        eprintln!("Skipping test: PULSE_TEST_MYSQL_URL not set");
        return;
    };
    let connection = ConnectionConfig::from_connection_string(&url).unwrap();
    let executor = QueryExecutor::new(&connection, TIMEOUT);

    let table = executor
        .execute(&resolve(Selection::Home {
            view: HomeView::CategoryInsights,
        }))
        .await
        .unwrap();
    assert_eq!(table.column_names(), vec!["transaction_type", "total_amount"]);
}
