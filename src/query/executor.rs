//! Scoped query execution.
//!
//! Every call opens its own connection, runs one bound statement, and closes
//! the connection again before returning, whatever the outcome.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::catalog::ResolvedQuery;
use crate::config::ConnectionConfig;
use crate::db::{self, DatabaseClient, QueryResult};
use crate::error::{DashboardError, Result};

/// Runs resolved catalog queries against the configured database.
pub struct QueryExecutor<'a> {
    connection: &'a ConnectionConfig,
    timeout: Duration,
}

impl<'a> QueryExecutor<'a> {
    /// Creates a new query executor.
    pub fn new(connection: &'a ConnectionConfig, timeout: Duration) -> Self {
        Self {
            connection,
            timeout,
        }
    }

    /// Executes a resolved query with its bound parameters.
    ///
    /// Fails with `Connection` if the database cannot be reached and `Query`
    /// if the statement fails or exceeds the timeout. No retries.
    pub async fn execute(&self, query: &ResolvedQuery) -> Result<QueryResult> {
        let client = db::connect(self.connection).await?;
        debug!(
            "Executing '{}' on {} with {} parameter(s)",
            query.definition.label,
            self.connection.backend.as_str(),
            query.params.len()
        );

        let result = self.execute_on(client, query).await;

        if let Ok(ref table) = result {
            info!(
                "'{}' returned {} row(s) in {}ms",
                query.definition.label,
                table.row_count,
                table.execution_time.as_millis()
            );
        }

        result
    }

    /// Runs `query` on `client` and releases the client before returning.
    ///
    /// A timed-out client is dropped rather than closed: closing would wait
    /// for the abandoned statement to finish.
    async fn execute_on(
        &self,
        mut client: Box<dyn DatabaseClient>,
        query: &ResolvedQuery,
    ) -> Result<QueryResult> {
        let deadline = tokio::time::Instant::now() + self.timeout;

        let outcome = tokio::time::timeout_at(
            deadline,
            client.execute_query(query.sql(), &query.params),
        )
        .await;

        let Ok(result) = outcome else {
            warn!(
                "'{}' timed out; dropping its connection",
                query.definition.label
            );
            drop(client);
            return Err(DashboardError::query(format!(
                "Query timed out after {}ms",
                self.timeout.as_millis()
            )));
        };

        match tokio::time::timeout_at(deadline, client.close()).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!("Error closing database connection: {}", e),
            Err(_) => warn!("Closing the database connection timed out"),
        }

        result
    }
}
