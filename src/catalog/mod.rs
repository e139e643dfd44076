//! Query catalog for the dashboard.
//!
//! Maps every [`Selection`] to exactly one immutable [`QueryDefinition`]
//! plus the values bound to its placeholders.

mod definitions;
pub mod schema;
mod verify;

pub use definitions::case_study;
pub use verify::{verify_catalog, TemplateReport, TemplateVerifier};

use crate::db::Value;
use crate::error::Result;
use crate::selection::{CaseStudyTopic, HomeView, Selection, SelectionState};
use serde::Serialize;

/// A catalogued, parameterized SQL query.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct QueryDefinition {
    /// Human-readable name, also used for chart titles.
    pub label: &'static str,
    /// SQL with `?` placeholders.
    pub sql_template: &'static str,
    /// Names of the placeholders, in binding order.
    pub parameters: &'static [&'static str],
    /// Column that splits bars into series (grouped bars), if any.
    pub series_column: Option<usize>,
}

/// A selection resolved to its query, bound values and titles.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedQuery {
    pub selection: Selection,
    pub definition: &'static QueryDefinition,
    pub params: Vec<Value>,
    /// Heading shown above the table.
    pub heading: String,
    /// Title of the bar chart.
    pub chart_title: String,
}

impl ResolvedQuery {
    pub fn sql(&self) -> &'static str {
        self.definition.sql_template
    }
}

/// Resolves a validated selection. Pure and infallible.
pub fn resolve(selection: Selection) -> ResolvedQuery {
    match selection {
        Selection::Home { view } => resolve_home(selection, view),
        Selection::CaseStudy { topic, query } => {
            let definition = &case_study(topic)[query.index()];
            ResolvedQuery {
                selection,
                definition,
                params: Vec::new(),
                heading: format!("{} - {query}", topic.label()),
                chart_title: format!("{} - Detailed Analysis", topic.label()),
            }
        }
    }
}

fn resolve_home(selection: Selection, view: HomeView) -> ResolvedQuery {
    match view {
        HomeView::TransactionOverview => ResolvedQuery {
            selection,
            definition: &definitions::TRANSACTION_OVERVIEW,
            params: Vec::new(),
            heading: "Total Sum of Transaction Amount per Year and Quarter".to_string(),
            chart_title: definitions::TRANSACTION_OVERVIEW.label.to_string(),
        },
        HomeView::CategoryInsights => ResolvedQuery {
            selection,
            definition: &definitions::CATEGORY_INSIGHTS,
            params: Vec::new(),
            heading: definitions::CATEGORY_INSIGHTS.label.to_string(),
            chart_title: definitions::CATEGORY_INSIGHTS.label.to_string(),
        },
        HomeView::StateWiseTrends(quarter) => {
            let title = format!(
                "{} for Quarter {quarter}",
                definitions::STATE_WISE_TRENDS.label
            );
            ResolvedQuery {
                selection,
                definition: &definitions::STATE_WISE_TRENDS,
                params: vec![Value::Int(i64::from(quarter.get()))],
                heading: title.clone(),
                chart_title: title,
            }
        }
    }
}

/// Validates raw input and resolves it.
///
/// Fails with `InvalidSelection` naming the first out-of-domain field.
pub fn resolve_state(state: &SelectionState) -> Result<ResolvedQuery> {
    let selection = Selection::try_from(state)?;
    Ok(resolve(selection))
}

/// Every definition in the catalog: home views, then topics in menu order.
pub fn all_definitions() -> impl Iterator<Item = &'static QueryDefinition> {
    [
        &definitions::TRANSACTION_OVERVIEW,
        &definitions::CATEGORY_INSIGHTS,
        &definitions::STATE_WISE_TRENDS,
    ]
    .into_iter()
    .chain(
        CaseStudyTopic::ALL
            .into_iter()
            .flat_map(|topic| case_study(topic).iter()),
    )
}
