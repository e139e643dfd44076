//! MySQL database client implementation.
//!
//! Provides the `MySqlClient` struct that implements the `DatabaseClient` trait
//! over a single sqlx `MySqlConnection`.

use crate::config::ConnectionConfig;
use crate::db::{ColumnInfo, DatabaseClient, QueryResult, Row, Value};
use crate::error::{DashboardError, Result};
use async_trait::async_trait;
use sqlx::mysql::{MySqlArguments, MySqlConnectOptions, MySqlConnection, MySqlRow};
use sqlx::query::Query;
use sqlx::{
    Column as SqlxColumn, ConnectOptions, Connection, Executor, MySql, Row as SqlxRow, Statement,
    TypeInfo,
};
use std::time::Instant;
use tracing::debug;

/// MySQL database client owning one connection.
#[derive(Debug)]
pub struct MySqlClient {
    conn: MySqlConnection,
}

impl MySqlClient {
    /// Opens a single connection. No retries: a failed attempt is reported
    /// to the user, who can reload.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self> {
        let options = connect_options(config)?;
        debug!("Opening MySQL connection to {}", config.display_string());

        let conn = options
            .connect()
            .await
            .map_err(|e| map_connection_error(e, config))?;

        Ok(Self { conn })
    }

    /// Fetches column metadata for a statement that returned no rows.
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
impl DatabaseClient for MySqlClient {
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
                .map(|col| ColumnInfo::new(col.name(), col.type_info().name()))
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

/// Builds connect options from the connection config.
fn connect_options(config: &ConnectionConfig) -> Result<MySqlConnectOptions> {
    let database = config
        .database
        .as_deref()
        .ok_or_else(|| DashboardError::config("Database name is required"))?;

    let mut options = MySqlConnectOptions::new()
        .host(config.host.as_deref().unwrap_or("localhost"))
        .port(config.port)
        .database(database);

    if let Some(user) = &config.user {
        options = options.username(user);
    }
    if let Some(password) = &config.password {
        options = options.password(password);
    }

    Ok(options)
}

/// Binds one parameter to its positional placeholder.
fn bind_value<'q>(
    query: Query<'q, MySql, MySqlArguments>,
    value: &Value,
) -> Query<'q, MySql, MySqlArguments> {
    match value {
        Value::Null => query.bind(None::<String>),
        Value::Bool(b) => query.bind(*b),
        Value::Int(i) => query.bind(*i),
        Value::Float(f) => query.bind(*f),
        Value::String(s) => query.bind(s.clone()),
        Value::Bytes(b) => query.bind(b.clone()),
    }
}

/// Converts a sqlx MySqlRow to our Row type.
fn convert_row(row: &MySqlRow) -> Row {
    row.columns()
        .iter()
        .enumerate()
        .map(|(i, col)| convert_value(row, i, col.type_info().name()))
        .collect()
}

/// Converts a single column value from a MySqlRow to our Value type.
fn convert_value(row: &MySqlRow, index: usize, type_name: &str) -> Value {
    let upper = type_name.to_uppercase();
    match upper.as_str() {
        "BOOLEAN" => row
            .try_get::<Option<bool>, _>(index)
            .ok()
            .flatten()
            .map(Value::Bool)
            .unwrap_or(Value::Null),

        // Integer widths all decode into i64
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" | "YEAR" => row
            .try_get_unchecked::<Option<i64>, _>(index)
            .ok()
            .flatten()
            .map(Value::Int)
            .unwrap_or(Value::Null),

        t if t.ends_with("UNSIGNED") => row
            .try_get_unchecked::<Option<u64>, _>(index)
            .ok()
            .flatten()
            .map(|v| Value::Int(i64::try_from(v).unwrap_or(i64::MAX)))
            .unwrap_or(Value::Null),

        "FLOAT" => row
            .try_get::<Option<f32>, _>(index)
            .ok()
            .flatten()
            .map(|v| Value::Float(v as f64))
            .unwrap_or(Value::Null),

        "DOUBLE" => row
            .try_get::<Option<f64>, _>(index)
            .ok()
            .flatten()
            .map(Value::Float)
            .unwrap_or(Value::Null),

        // SUM() over integer columns yields DECIMAL, sent as text
        "DECIMAL" => row
            .try_get_unchecked::<Option<String>, _>(index)
            .ok()
            .flatten()
            .map(Value::String)
            .unwrap_or(Value::Null),

        "BINARY" | "VARBINARY" | "BLOB" | "TINYBLOB" | "MEDIUMBLOB" | "LONGBLOB" => row
            .try_get::<Option<Vec<u8>>, _>(index)
            .ok()
            .flatten()
            .map(Value::Bytes)
            .unwrap_or(Value::Null),

        // For all other types, try to get as string
        _ => row
            .try_get::<Option<String>, _>(index)
            .ok()
            .flatten()
            .map(Value::String)
            .unwrap_or(Value::Null),
    }
}

/// Maps sqlx connection errors to user-friendly messages.
fn map_connection_error(error: sqlx::Error, config: &ConnectionConfig) -> DashboardError {
    let host = config.host.as_deref().unwrap_or("localhost");
    let port = config.port;
    let user = config.user.as_deref().unwrap_or("root");
    let database = config.database.as_deref().unwrap_or("unknown");

    let error_str = error.to_string().to_lowercase();

    if error_str.contains("access denied") {
        DashboardError::connection(format!(
            "Authentication failed for user '{user}'. Check your credentials."
        ))
    } else if error_str.contains("unknown database") {
        DashboardError::connection(format!("Database '{database}' does not exist."))
    } else if error_str.contains("connection refused")
        || error_str.contains("could not connect")
        || error_str.contains("error communicating")
    {
        DashboardError::connection(format!(
            "Cannot connect to {host}:{port}. Check that the server is running."
        ))
    } else if error_str.contains("timed out") || error_str.contains("timeout") {
        DashboardError::connection(format!(
            "Connection to {host}:{port} timed out. The server may be overloaded or unreachable."
        ))
    } else {
        DashboardError::connection(error.to_string())
    }
}

/// Formats a query error with the server error number when available.
fn format_query_error(error: sqlx::Error) -> String {
    match error.as_database_error() {
        Some(db_error) => {
            match db_error.try_downcast_ref::<sqlx::mysql::MySqlDatabaseError>() {
                Some(mysql_error) => {
                    format!("ERROR {}: {}", mysql_error.number(), mysql_error.message())
                }
                None => format!("ERROR: {}", db_error.message()),
            }
        }
        None => error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DatabaseBackend;

    // Note: the live-server test requires a running MySQL database.
    // It is skipped unless PULSE_TEST_MYSQL_URL is set.

    fn get_test_database_url() -> Option<String> {
        std::env::var("PULSE_TEST_MYSQL_URL").ok()
    }

    #[test]
    fn test_connect_options_require_database() {
        let config = ConnectionConfig {
            backend: DatabaseBackend::Mysql,
            host: Some("localhost".to_string()),
            ..Default::default()
        };
        let err = connect_options(&config).unwrap_err();
        assert!(matches!(err, DashboardError::Config(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_connection_error() {
        let config = ConnectionConfig {
            backend: DatabaseBackend::Mysql,
            host: Some("127.0.0.1".to_string()),
            port: 1,
            database: Some("phonepe_insights".to_string()),
            user: Some("reader".to_string()),
            ..Default::default()
        };

        let result = MySqlClient::connect(&config).await;
        assert!(matches!(result, Err(DashboardError::Connection(_))));
    }

    #[tokio::test]
    async fn test_execute_bound_select() {
        let Some(url) = get_test_database_url() else {
            eprintln!("Skipping test: PULSE_TEST_MYSQL_URL not set");
            return;
        };
        let config = ConnectionConfig::from_connection_string(&url).unwrap();
        let mut client = MySqlClient::connect(&config).await.unwrap();

        let result = client
            .execute_query("SELECT ? AS quarter, 'done' AS status", &[Value::Int(3)])
            .await
            .unwrap();

        assert_eq!(result.columns.len(), 2);
        assert_eq!(result.columns[0].name, "quarter");
        assert_eq!(result.rows[0][0].as_f64(), Some(3.0));

        Box::new(client).close().await.unwrap();
    }
}
