//! Database abstraction layer for Pulse Insights.
//!
//! Provides a trait-based interface over a single database connection, so
//! the executor can open, use and close one connection per interaction
//! regardless of backend.

mod mysql;
mod sqlite;
mod types;

pub use mysql::MySqlClient;
pub use sqlite::SqliteClient;
pub use types::{ColumnInfo, QueryResult, Row, Value};

use crate::config::ConnectionConfig;
use crate::error::Result;
use async_trait::async_trait;

/// Supported database backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    #[default]
    Mysql,
    /// Local file or seeded in-memory database.
    Sqlite,
}

impl DatabaseBackend {
    /// Returns the backend as a string for display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mysql => "mysql",
            Self::Sqlite => "sqlite",
        }
    }

    /// Parses a backend from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "mysql" | "mariadb" => Some(Self::Mysql),
            "sqlite" | "sqlite3" => Some(Self::Sqlite),
            _ => None,
        }
    }

    /// Returns the default port for this backend.
    pub fn default_port(&self) -> u16 {
        match self {
            Self::Mysql => 3306,
            Self::Sqlite => 0,
        }
    }
}

/// Opens a fresh connection for the given configuration.
///
/// This is the central factory function for database connections.
pub async fn connect(config: &ConnectionConfig) -> Result<Box<dyn DatabaseClient>> {
    match config.backend {
        DatabaseBackend::Mysql => {
            let client = MySqlClient::connect(config).await?;
            Ok(Box::new(client))
        }
        DatabaseBackend::Sqlite => {
            let client = SqliteClient::connect(config).await?;
            Ok(Box::new(client))
        }
    }
}

/// A single open database connection.
///
/// Clients own their connection exclusively; nothing is pooled or shared.
#[async_trait]
pub trait DatabaseClient: Send {
    /// Executes a SQL statement with positional parameters bound to its `?`
    /// placeholders, returning every row.
    async fn execute_query(&mut self, sql: &str, params: &[Value]) -> Result<QueryResult>;

    /// Closes the connection.
    async fn close(self: Box<Self>) -> Result<()>;
}
