//! Static verification of catalog templates.
//!
//! Uses sqlparser-rs with the MySQL dialect to parse each template and
//! check it against the schema fixture in [`super::schema`].

use std::collections::BTreeSet;
use std::ops::ControlFlow;

use sqlparser::ast::{
    visit_expressions, visit_relations, Expr, SelectItem, SetExpr, Statement, Value as SqlValue,
};
use sqlparser::dialect::MySqlDialect;
use sqlparser::parser::Parser;

use super::schema::{self, TableSchema};
use super::QueryDefinition;
use crate::error::{DashboardError, Result};

/// What a template reads and produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateReport {
    /// Tables referenced in FROM/JOIN clauses.
    pub tables: Vec<String>,
    /// Column identifiers referenced anywhere in the statement.
    pub columns: BTreeSet<String>,
    /// Output column aliases, in projection order.
    pub aliases: Vec<String>,
    /// Number of projected columns.
    pub output_columns: usize,
    /// Number of `?` placeholders.
    pub placeholders: usize,
}

/// Checks catalog templates for syntax and schema conformance.
#[derive(Debug)]
pub struct TemplateVerifier {
    dialect: MySqlDialect,
}

impl Default for TemplateVerifier {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateVerifier {
    pub fn new() -> Self {
        Self {
            dialect: MySqlDialect {},
        }
    }

    /// Parses a template and collects what it references.
    ///
    /// Fails unless the SQL is exactly one SELECT query.
    pub fn inspect(&self, sql: &str) -> Result<TemplateReport> {
        let statements = Parser::parse_sql(&self.dialect, sql)
            .map_err(|e| DashboardError::query(format!("SQL parse error: {e}")))?;

        let statement = match statements.as_slice() {
            [single] => single,
            [] => return Err(DashboardError::query("Empty SQL template")),
            _ => {
                return Err(DashboardError::query(format!(
                    "Expected one statement, found {}",
                    statements.len()
                )))
            }
        };

        let projection = match statement {
            Statement::Query(query) => match query.body.as_ref() {
                SetExpr::Select(select) => &select.projection,
                _ => return Err(DashboardError::query("Template must be a plain SELECT")),
            },
            _ => return Err(DashboardError::query("Template must be a SELECT query")),
        };

        let aliases = projection
            .iter()
            .filter_map(|item| match item {
                SelectItem::ExprWithAlias { alias, .. } => Some(alias.value.clone()),
                _ => None,
            })
            .collect();

        let mut tables = Vec::new();
        let _ = visit_relations(statement, |name| {
            if let Some(ident) = name.0.last() {
                tables.push(ident.value.clone());
            }
            ControlFlow::<()>::Continue(())
        });

        let mut columns = BTreeSet::new();
        let mut placeholders = 0;
        let _ = visit_expressions(statement, |expr| {
            match expr {
                Expr::Identifier(ident) => {
                    columns.insert(ident.value.clone());
                }
                Expr::CompoundIdentifier(parts) => {
                    if let Some(last) = parts.last() {
                        columns.insert(last.value.clone());
                    }
                }
                Expr::Value(SqlValue::Placeholder(_)) => placeholders += 1,
                _ => {}
            }
            ControlFlow::<()>::Continue(())
        });

        Ok(TemplateReport {
            tables,
            columns,
            aliases,
            output_columns: projection.len(),
            placeholders,
        })
    }

    /// Verifies a definition against the schema fixture.
    ///
    /// Checks that the template parses, reads only known tables and columns,
    /// projects at least two columns, and declares one parameter per placeholder.
    pub fn verify(&self, definition: &QueryDefinition) -> Result<TemplateReport> {
        let report = self.inspect(definition.sql_template)?;
        let fail = |msg: String| DashboardError::query(format!("{}: {msg}", definition.label));

        let mut tables: Vec<&'static TableSchema> = Vec::with_capacity(report.tables.len());
        for name in &report.tables {
            let table =
                schema::find_table(name).ok_or_else(|| fail(format!("unknown table '{name}'")))?;
            tables.push(table);
        }
        if tables.is_empty() {
            return Err(fail("no table referenced".to_string()));
        }

        for column in &report.columns {
            let known = tables.iter().any(|t| t.has_column(column))
                || report.aliases.iter().any(|a| a.eq_ignore_ascii_case(column));
            if !known {
                return Err(fail(format!("unknown column '{column}'")));
            }
        }

        if report.output_columns < 2 {
            return Err(fail(format!(
                "projects {} column(s), charts need at least 2",
                report.output_columns
            )));
        }

        if report.placeholders != definition.parameters.len() {
            return Err(fail(format!(
                "has {} placeholder(s) but declares {} parameter(s)",
                report.placeholders,
                definition.parameters.len()
            )));
        }

        if let Some(series) = definition.series_column {
            if series == 0 || series + 1 >= report.output_columns {
                return Err(fail(format!(
                    "series column {series} must sit between category and value"
                )));
            }
        }

        Ok(report)
    }
}

/// Verifies every catalogued definition, returning the first failure.
pub fn verify_catalog() -> Result<usize> {
    let verifier = TemplateVerifier::new();
    let mut checked = 0;
    for definition in super::all_definitions() {
        verifier.verify(definition)?;
        checked += 1;
    }
    Ok(checked)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspect_collects_references() {
        let report = TemplateVerifier::new()
            .inspect(
                "SELECT state, SUM(transaction_amount) AS total_amount \
                 FROM aggregated_transaction WHERE quarter = ? GROUP BY state",
            )
            .unwrap();

        assert_eq!(report.tables, vec!["aggregated_transaction".to_string()]);
        assert!(report.columns.contains("state"));
        assert!(report.columns.contains("transaction_amount"));
        assert!(report.columns.contains("quarter"));
        assert_eq!(report.aliases, vec!["total_amount".to_string()]);
        assert_eq!(report.output_columns, 2);
        assert_eq!(report.placeholders, 1);
    }

    #[test]
    fn test_inspect_rejects_non_select() {
        let verifier = TemplateVerifier::new();
        assert!(verifier.inspect("DROP TABLE map_user").is_err());
        assert!(verifier.inspect("SELECT 1; SELECT 2").is_err());
        assert!(verifier.inspect("SELEC state FROM map_user").is_err());
    }

    #[test]
    fn test_verify_rejects_unknown_column() {
        let definition = QueryDefinition {
            label: "bad",
            sql_template: "SELECT state, SUM(amount) AS total FROM aggregated_transaction GROUP BY state",
            parameters: &[],
            series_column: None,
        };
        let err = TemplateVerifier::new().verify(&definition).unwrap_err();
        assert!(err.to_string().contains("unknown column 'amount'"));
    }

    #[test]
    fn test_verify_rejects_unknown_table() {
        let definition = QueryDefinition {
            label: "bad",
            sql_template: "SELECT State, SUM(Users_appOpens) AS opens FROM top_user GROUP BY State",
            parameters: &[],
            series_column: None,
        };
        let err = TemplateVerifier::new().verify(&definition).unwrap_err();
        assert!(err.to_string().contains("unknown table 'top_user'"));
    }

    #[test]
    fn test_verify_rejects_single_column() {
        let definition = QueryDefinition {
            label: "bad",
            sql_template: "SELECT SUM(Users_appOpens) AS opens FROM map_user",
            parameters: &[],
            series_column: None,
        };
        let err = TemplateVerifier::new().verify(&definition).unwrap_err();
        assert!(err.to_string().contains("at least 2"));
    }

    #[test]
    fn test_verify_rejects_undeclared_placeholder() {
        let definition = QueryDefinition {
            label: "bad",
            sql_template: "SELECT State, SUM(Users_appOpens) AS opens FROM map_user WHERE State = ? GROUP BY State",
            parameters: &[],
            series_column: None,
        };
        let err = TemplateVerifier::new().verify(&definition).unwrap_err();
        assert!(err.to_string().contains("placeholder"));
    }

    #[test]
    fn test_verify_catalog() {
        assert_eq!(verify_catalog().unwrap(), 3 + 25);
    }
}
