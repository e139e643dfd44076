//! Result table widget.
//!
//! Draws every row of a table view with boxed borders, column widths sized
//! to content, and NULLs dimmed.

use crate::render::{Cell, CellKind, TableView};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Maximum width for any column.
const MAX_COLUMN_WIDTH: usize = 32;

/// Minimum width for any column.
const MIN_COLUMN_WIDTH: usize = 4;

const BORDER: Style = Style::new().fg(Color::DarkGray);

/// Lays out a table view as styled lines.
pub struct ResultTable<'a> {
    view: &'a TableView,
}

impl<'a> ResultTable<'a> {
    pub fn new(view: &'a TableView) -> Self {
        Self { view }
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self
            .view
            .columns
            .iter()
            .map(|name| name.chars().count().max(MIN_COLUMN_WIDTH))
            .collect();

        for row in &self.view.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.text.chars().count());
            }
        }

        widths.into_iter().map(|w| w.min(MAX_COLUMN_WIDTH)).collect()
    }

    /// Shortens `s` to `max_width` characters, ending in "..." when cut.
    fn truncate(s: &str, max_width: usize) -> String {
        if s.chars().count() <= max_width {
            s.to_string()
        } else if max_width <= 3 {
            s.chars().take(max_width).collect()
        } else {
            let kept: String = s.chars().take(max_width - 3).collect();
            format!("{kept}...")
        }
    }

    /// Renders the table as lines, shrinking columns to fit `available_width`.
    pub fn render_to_lines(&self, available_width: usize) -> Vec<Line<'a>> {
        if self.view.columns.is_empty() {
            return vec![Line::from(Span::styled(
                "(no columns returned)",
                Style::default().fg(Color::DarkGray),
            ))];
        }

        let widths = self.column_widths();
        let total_width: usize = widths.iter().sum::<usize>() + widths.len() * 3 + 1;
        let scale = if total_width > available_width && available_width > 0 {
            available_width as f64 / total_width as f64
        } else {
            1.0
        };
        let widths: Vec<usize> = widths
            .iter()
            .map(|&w| ((w as f64 * scale) as usize).max(MIN_COLUMN_WIDTH))
            .collect();

        let mut lines = Vec::with_capacity(self.view.rows.len() + 5);
        lines.push(border(&widths, '┌', '┬', '┐'));
        lines.push(self.header_row(&widths));
        lines.push(border(&widths, '├', '┼', '┤'));
        for row in &self.view.rows {
            lines.push(data_row(row, &widths));
        }
        lines.push(border(&widths, '└', '┴', '┘'));

        let footer = format!(
            "{} row{} ({}ms)",
            self.view.row_count,
            if self.view.row_count == 1 { "" } else { "s" },
            self.view.execution_time_ms
        );
        lines.push(Line::from(Span::styled(
            footer,
            Style::default().fg(Color::DarkGray),
        )));

        lines
    }

    fn header_row(&self, widths: &[usize]) -> Line<'a> {
        let mut spans = vec![Span::styled("│", BORDER)];
        for (name, &width) in self.view.columns.iter().zip(widths) {
            let name = Self::truncate(name, width);
            spans.push(Span::styled(
                format!(" {name:width$} "),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled("│", BORDER));
        }
        Line::from(spans)
    }
}

fn border<'a>(widths: &[usize], left: char, mid: char, right: char) -> Line<'a> {
    let inner: Vec<String> = widths.iter().map(|&w| "─".repeat(w + 2)).collect();
    let text = format!("{left}{}{right}", inner.join(&mid.to_string()));
    Line::from(Span::styled(text, BORDER))
}

fn data_row<'a>(row: &[Cell], widths: &[usize]) -> Line<'a> {
    let mut spans = vec![Span::styled("│", BORDER)];
    for (cell, &width) in row.iter().zip(widths) {
        let text = ResultTable::truncate(&cell.text, width);
        let (padded, style) = match cell.kind {
            CellKind::Number => (format!(" {text:>width$} "), Style::default()),
            CellKind::Text => (format!(" {text:width$} "), Style::default()),
            CellKind::Null => (
                format!(" {text:width$} "),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ),
        };
        spans.push(Span::styled(padded, style));
        spans.push(Span::styled("│", BORDER));
    }
    Line::from(spans)
}
