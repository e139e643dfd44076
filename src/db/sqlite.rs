//! SQLite database client implementation.
//!
//! Serves local extracts of the aggregate tables and seeded in-memory
//! fixtures. With no `path`, every connection opens a fresh in-memory
//! database and runs the configured seed script first.

use crate::config::ConnectionConfig;
use crate::db::{ColumnInfo, DatabaseClient, QueryResult, Row, Value};
use crate::error::{DashboardError, Result};
use async_trait::async_trait;
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{
    Column as SqlxColumn, ConnectOptions, Connection, Executor, Row as SqlxRow, Sqlite, Statement,
    TypeInfo, ValueRef,
};
use std::str::FromStr;
use std::time::Instant;
use tracing::debug;

/// SQLite database client owning one connection.
#[derive(Debug)]
pub struct SqliteClient {
    conn: SqliteConnection,
}

impl SqliteClient {
    /// Opens the configured database file (read-only), or a seeded
    /// in-memory database when no file is configured.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self> {
        let options = match &config.path {
            Some(path) => {
                debug!("Opening SQLite database at {}", path.display());
                SqliteConnectOptions::new()
                    .filename(path)
                    .read_only(true)
                    .create_if_missing(false)
            }
            None => {
                debug!("Opening in-memory SQLite database");
                SqliteConnectOptions::from_str("sqlite::memory:").map_err(|e| {
                    DashboardError::connection(format!("Invalid SQLite options: {e}"))
                })?
            }
        };

        let mut conn = options.connect().await.map_err(|e| {
            DashboardError::connection(format!(
                "Cannot open SQLite database {}: {e}",
                config.display_string()
            ))
        })?;

        if let Some(seed) = &config.seed {
            let script = std::fs::read_to_string(seed).map_err(|e| {
                DashboardError::config(format!("Failed to read seed file {}: {e}", seed.display()))
            })?;
            if let Err(e) = sqlx::raw_sql(&script).execute(&mut conn).await {
                let _ = conn.close().await;
                return Err(DashboardError::config(format!(
                    "Seed file {} failed: {e}",
                    seed.display()
                )));
            }
        }

        Ok(Self { conn })
    }

    async fn describe_columns(&mut self, sql: &str) -> Vec<ColumnInfo> {
        match (&mut self.conn).prepare(sql).await {
            Ok(statement) => statement
                .columns()
                .iter()
                .map(|col| ColumnInfo::new(col.name(), col.type_info().name()))
                .collect(),
            Err(e) => {
                debug!("Could not describe result columns: {e}");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl DatabaseClient for SqliteClient {
    async fn execute_query(&mut self, sql: &str, params: &[Value]) -> Result<QueryResult> {
        let start = Instant::now();

        let mut query = sqlx::query(sql);
        for param in params {
            query = bind_value(query, param);
        }

        let result = query
            .fetch_all(&mut self.conn)
            .await
            .map_err(|e| DashboardError::query(format_query_error(e)))?;

        let execution_time = start.elapsed();

        let columns: Vec<ColumnInfo> = match result.first() {
            Some(first_row) => first_row
                .columns()
                .iter()
                .enumerate()
                .map(|(i, col)| ColumnInfo::new(col.name(), value_type_name(first_row, i)))
                .collect(),
            None => self.describe_columns(sql).await,
        };

        let rows: Vec<Row> = result.iter().map(convert_row).collect();
        let row_count = rows.len();

        Ok(QueryResult {
            columns,
            rows,
            execution_time,
            row_count,
        })
    }

    async fn close(self: Box<Self>) -> Result<()> {
        let Self { conn } = *self;
        conn.close()
            .await
            .map_err(|e| DashboardError::connection(format!("Failed to close connection: {e}")))
    }
}

fn bind_value<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: &Value,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        Value::Null => query.bind(None::<String>),
        Value::Bool(b) => query.bind(*b),
        Value::Int(i) => query.bind(*i),
        Value::Float(f) => query.bind(*f),
        Value::String(s) => query.bind(s.clone()),
        Value::Bytes(b) => query.bind(b.clone()),
    }
}

/// Storage class of the value itself. Expression columns such as `SUM(..)`
/// have no declared type, so the value decides.
fn value_type_name(row: &SqliteRow, index: usize) -> String {
    match row.try_get_raw(index) {
        Ok(raw) if raw.is_null() => "NULL".to_string(),
        Ok(raw) => raw.type_info().name().to_uppercase(),
        Err(_) => "NULL".to_string(),
    }
}

fn convert_row(row: &SqliteRow) -> Row {
    (0..row.columns().len())
        .map(|i| convert_value(row, i))
        .collect()
}

fn convert_value(row: &SqliteRow, index: usize) -> Value {
    match value_type_name(row, index).as_str() {
        "NULL" => Value::Null,
        "INTEGER" | "INT" | "BIGINT" => row
            .try_get_unchecked::<i64, _>(index)
            .map(Value::Int)
            .unwrap_or(Value::Null),
        "BOOLEAN" => row
            .try_get_unchecked::<bool, _>(index)
            .map(Value::Bool)
            .unwrap_or(Value::Null),
        "REAL" | "FLOAT" | "DOUBLE" | "NUMERIC" => row
            .try_get_unchecked::<f64, _>(index)
            .map(Value::Float)
            .unwrap_or(Value::Null),
        "BLOB" => row
            .try_get_unchecked::<Vec<u8>, _>(index)
            .map(Value::Bytes)
            .unwrap_or(Value::Null),
        _ => row
            .try_get_unchecked::<String, _>(index)
            .map(Value::String)
            .unwrap_or(Value::Null),
    }
}

fn format_query_error(error: sqlx::Error) -> String {
    match error.as_database_error() {
        Some(db_error) => format!("ERROR: {}", db_error.message()),
        None => error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DatabaseBackend;
    use std::path::PathBuf;

    fn memory_config() -> ConnectionConfig {
        ConnectionConfig {
            backend: DatabaseBackend::Sqlite,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_bound_parameter_is_a_value_not_sql() {
        let mut client = SqliteClient::connect(&memory_config()).await.unwrap();

        let result = client
            .execute_query(
                "SELECT ? AS quarter, 'x' AS label",
                &[Value::from("1; DROP TABLE map_user")],
            )
            .await
            .unwrap();

        assert_eq!(
            result.rows[0][0],
            Value::String("1; DROP TABLE map_user".to_string())
        );
        Box::new(client).close().await.unwrap();
    }

    #[tokio::test]
    async fn test_value_types() {
        let mut client = SqliteClient::connect(&memory_config()).await.unwrap();

        let result = client
            .execute_query("SELECT 1 AS i, 2.5 AS r, 'Goa' AS t, NULL AS n", &[])
            .await
            .unwrap();

        assert_eq!(
            result.rows[0],
            vec![
                Value::Int(1),
                Value::Float(2.5),
                Value::String("Goa".to_string()),
                Value::Null
            ]
        );
        assert_eq!(result.columns[0].data_type, "INTEGER");
        Box::new(client).close().await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_file_is_connection_error() {
        let config = ConnectionConfig {
            backend: DatabaseBackend::Sqlite,
            path: Some(PathBuf::from("/nonexistent/dir/pulse.db")),
            ..Default::default()
        };
        let result = SqliteClient::connect(&config).await;
        assert!(matches!(result, Err(DashboardError::Connection(_))));
    }

    #[tokio::test]
    async fn test_missing_table_is_query_error() {
        let mut client = SqliteClient::connect(&memory_config()).await.unwrap();
        let result = client
            .execute_query("SELECT State, Users_appOpens FROM map_user", &[])
            .await;
        assert!(matches!(result, Err(DashboardError::Query(_))));
        Box::new(client).close().await.unwrap();
    }
}
