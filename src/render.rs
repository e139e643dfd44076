//! Result presentation.
//!
//! Turns a query result into a table view and a categorical bar chart:
//! the first column names each bar, the last column sizes it.

use serde::Serialize;

use crate::db::{QueryResult, Value};
use crate::error::{DashboardError, Result};

/// How a table cell is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    Text,
    /// Right-aligned.
    Number,
    /// Dimmed.
    Null,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub text: String,
    pub kind: CellKind,
}

impl From<&Value> for Cell {
    fn from(value: &Value) -> Self {
        let kind = match value {
            Value::Null => CellKind::Null,
            Value::Int(_) | Value::Float(_) => CellKind::Number,
            _ => CellKind::Text,
        };
        Self {
            text: value.to_display_string(),
            kind,
        }
    }
}

/// Every row of a result as display text, in database order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
    pub row_count: usize,
    pub execution_time_ms: u64,
}

impl TableView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl From<&QueryResult> for TableView {
    fn from(result: &QueryResult) -> Self {
        Self {
            columns: result.columns.iter().map(|c| c.name.clone()).collect(),
            rows: result
                .rows
                .iter()
                .map(|row| row.iter().map(Cell::from).collect())
                .collect(),
            row_count: result.row_count,
            execution_time_ms: result.execution_time.as_millis() as u64,
        }
    }
}

/// One bar of the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBar {
    pub label: String,
    pub value: f64,
}

/// A bar chart ready to draw. Bars keep the row order of the result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChartSpec {
    pub title: String,
    /// Name of the category (first) column.
    pub category_axis: String,
    /// Name of the value (last) column.
    pub value_axis: String,
    pub bars: Vec<ChartBar>,
}

impl BarChartSpec {
    /// Largest bar value, or 0 for an empty chart.
    pub fn max_value(&self) -> f64 {
        self.bars.iter().map(|b| b.value).fold(0.0, f64::max)
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// Renders a result as a table view plus a chart.
///
/// Fails with `UnrenderableResult` when the result cannot be charted.
pub fn render(
    table: &QueryResult,
    title: &str,
    series_column: Option<usize>,
) -> Result<(TableView, BarChartSpec)> {
    let chart = build_chart(table, title, series_column)?;
    Ok((TableView::from(table), chart))
}

/// Builds the chart for a result.
///
/// With a `series_column` that sits strictly between the category and value
/// columns, each bar is labelled `category/series`. NULL values draw as 0.
fn build_chart(
    table: &QueryResult,
    title: &str,
    series_column: Option<usize>,
) -> Result<BarChartSpec> {
    let column_count = table.columns.len();
    if column_count < 2 {
        return Err(DashboardError::unrenderable(format!(
            "result has {column_count} column(s); a bar chart needs a category and a value column"
        )));
    }

    let value_index = column_count - 1;
    let series = series_column.filter(|&s| s > 0 && s < value_index);
    let value_axis = table.columns[value_index].name.clone();

    let mut bars = Vec::with_capacity(table.rows.len());
    for (row_number, row) in table.rows.iter().enumerate() {
        let category = row
            .first()
            .map(Value::to_display_string)
            .unwrap_or_default();

        let label = match series.and_then(|s| row.get(s)) {
            Some(series_value) => format!("{category}/{series_value}"),
            None => category,
        };

        let value = match row.get(value_index) {
            None | Some(Value::Null) => 0.0,
            Some(cell) => cell.as_f64().ok_or_else(|| {
                DashboardError::unrenderable(format!(
                    "row {}: '{}' in column '{}' is not numeric",
                    row_number + 1,
                    cell,
                    value_axis
                ))
            })?,
        };

        bars.push(ChartBar { label, value });
    }

    Ok(BarChartSpec {
        title: title.to_string(),
        category_axis: table.columns[0].name.clone(),
        value_axis,
        bars,
    })
}
