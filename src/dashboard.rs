//! The resolve → execute → render pipeline.
//!
//! [`Dashboard::show`] is the render boundary: every failure below it ends up
//! as an inline [`Notice`] on the returned [`Presentation`].

use std::time::Duration;

use serde::Serialize;
use tracing::{info, warn};

use crate::catalog::{self, ResolvedQuery};
use crate::config::{ConnectionConfig, DashboardSettings};
use crate::error::DashboardError;
use crate::query::QueryExecutor;
use crate::render::{self, BarChartSpec, TableView};
use crate::selection::Selection;

/// Severity of a notice shown above the results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Warning,
    Error,
}

/// A human-readable message displayed inline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub category: &'static str,
    pub message: String,
}

impl From<&DashboardError> for Notice {
    fn from(error: &DashboardError) -> Self {
        Self {
            level: if error.is_warning() {
                NoticeLevel::Warning
            } else {
                NoticeLevel::Error
            },
            category: error.category(),
            message: error.to_string(),
        }
    }
}

/// Everything drawn for one interaction.
#[derive(Debug, Clone, Serialize)]
pub struct Presentation {
    pub selection: Selection,
    pub heading: String,
    pub sql: &'static str,
    /// Absent when the query failed.
    pub table: Option<TableView>,
    /// Absent when the query failed or the result cannot be charted.
    pub chart: Option<BarChartSpec>,
    pub notices: Vec<Notice>,
}

impl Presentation {
    fn failed(query: &ResolvedQuery, error: &DashboardError) -> Self {
        Self {
            selection: query.selection,
            heading: query.heading.clone(),
            sql: query.sql(),
            table: None,
            chart: None,
            notices: vec![Notice::from(error)],
        }
    }

    /// Returns true if any notice is an error.
    pub fn has_errors(&self) -> bool {
        self.notices.iter().any(|n| n.level == NoticeLevel::Error)
    }
}

/// Stateless dashboard over one database connection config.
#[derive(Debug, Clone)]
pub struct Dashboard {
    connection: ConnectionConfig,
    query_timeout: Duration,
}

impl Dashboard {
    pub fn new(connection: ConnectionConfig, settings: &DashboardSettings) -> Self {
        Self {
            connection,
            query_timeout: settings.query_timeout(),
        }
    }

    pub fn connection(&self) -> &ConnectionConfig {
        &self.connection
    }

    /// Runs the full pipeline for one selection. Never fails: errors become
    /// notices, and an unchartable result still shows its table.
    pub async fn show(&self, selection: Selection) -> Presentation {
        let query = catalog::resolve(selection);
        info!("Showing {}", selection);

        let executor = QueryExecutor::new(&self.connection, self.query_timeout);
        let result = match executor.execute(&query).await {
            Ok(result) => result,
            Err(e) => {
                warn!("{}: {}", e.category(), e);
                return Presentation::failed(&query, &e);
            }
        };

        let mut notices = Vec::new();
        let (table, chart) = match render::render(
            &result,
            &query.chart_title,
            query.definition.series_column,
        ) {
            Ok((table, chart)) => (table, Some(chart)),
            Err(e) => {
                warn!("{}: {}", e.category(), e);
                notices.push(Notice::from(&e));
                (TableView::from(&result), None)
            }
        };

        Presentation {
            selection,
            heading: query.heading,
            sql: query.definition.sql_template,
            table: Some(table),
            chart,
            notices,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DatabaseBackend;
    use crate::selection::HomeView;

    #[test]
    fn test_notice_levels() {
        let warning = Notice::from(&DashboardError::unrenderable("1 column"));
        assert_eq!(warning.level, NoticeLevel::Warning);

        let error = Notice::from(&DashboardError::connection("refused"));
        assert_eq!(error.level, NoticeLevel::Error);
        assert_eq!(error.category, "Connection Error");
    }

    #[tokio::test]
    async fn test_show_reports_connection_failure_inline() {
        let connection = ConnectionConfig {
            backend: DatabaseBackend::Sqlite,
            path: Some("/nonexistent/pulse.db".into()),
            ..Default::default()
        };
        let dashboard = Dashboard::new(connection, &DashboardSettings::default());

        let presentation = dashboard
            .show(Selection::Home {
                view: HomeView::CategoryInsights,
            })
            .await;

        assert!(presentation.has_errors());
        assert!(presentation.table.is_none());
        assert!(presentation.chart.is_none());
        assert_eq!(presentation.heading, "Transaction Amount by Type");
    }
}
