//! Bar chart widget.
//!
//! Wraps ratatui's `BarChart` in horizontal mode so long category labels such
//! as state names stay readable.

use crate::render::BarChartSpec;
use ratatui::{
    buffer::Buffer,
    layout::{Direction, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Widget},
};

/// Bars are drawn against a fixed scale; the real value is printed as text.
const SCALE: f64 = 1000.0;

const MAX_LABEL_WIDTH: usize = 24;

pub struct ResultChart<'a> {
    spec: &'a BarChartSpec,
    offset: usize,
}

impl<'a> ResultChart<'a> {
    pub fn new(spec: &'a BarChartSpec) -> Self {
        Self { spec, offset: 0 }
    }

    /// Starts drawing at bar `offset`.
    pub fn offset(mut self, offset: u16) -> Self {
        self.offset = usize::from(offset);
        self
    }

    /// First bar drawn when `visible` bars fit.
    fn first_bar(&self, visible: usize) -> usize {
        self.offset.min(self.spec.len().saturating_sub(visible))
    }

    fn bars(&self, first: usize, visible: usize) -> Vec<Bar<'a>> {
        let max = self.spec.max_value();
        self.spec
            .bars
            .iter()
            .skip(first)
            .take(visible)
            .map(|bar| {
                let scaled = if max > 0.0 {
                    (bar.value.max(0.0) / max * SCALE).round() as u64
                } else {
                    0
                };
                let label: String = bar.label.chars().take(MAX_LABEL_WIDTH).collect();
                Bar::default()
                    .value(scaled)
                    .label(Line::from(label))
                    .text_value(format_value(bar.value))
                    .style(Style::default().fg(Color::Cyan))
            })
            .collect()
    }
}

/// Formats a bar value, dropping a zero fractional part.
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value:.2}")
    }
}

impl Widget for ResultChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let visible = usize::from(area.height.saturating_sub(2));
        let first = self.first_bar(visible);
        let total = self.spec.len();

        let mut title = format!(
            " {} ({} by {}) ",
            self.spec.title, self.spec.value_axis, self.spec.category_axis
        );
        if visible < total {
            let last = (first + visible).min(total);
            title.push_str(&format!("[{}-{} of {total}] ", first + 1, last));
        }
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title);

        let bars = self.bars(first, visible);
        BarChart::default()
            .block(block)
            .direction(Direction::Horizontal)
            .bar_width(1)
            .bar_gap(0)
            .max(SCALE as u64)
            .value_style(Style::default().fg(Color::White))
            .data(BarGroup::default().bars(&bars))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ChartBar;

    fn spec(values: &[(&str, f64)]) -> BarChartSpec {
        BarChartSpec {
            title: "Transaction Amount by Type".to_string(),
            category_axis: "transaction_type".to_string(),
            value_axis: "total_amount".to_string(),
            bars: values
                .iter()
                .map(|(label, value)| ChartBar {
                    label: label.to_string(),
                    value: *value,
                })
                .collect(),
        }
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(15.0), "15");
        assert_eq!(format_value(0.5), "0.50");
    }

    #[test]
    fn test_one_bar_per_entry() {
        let spec = spec(&[("A", 100.0), ("B", 50.0)]);
        assert_eq!(ResultChart::new(&spec).bars(0, 10).len(), 2);
    }

    #[test]
    fn test_offset_is_clamped_to_a_full_window() {
        let labels: Vec<String> = (0..40).map(|i| format!("state-{i}")).collect();
        let values: Vec<(&str, f64)> = labels.iter().map(|l| (l.as_str(), 1.0)).collect();
        let spec = spec(&values);

        assert_eq!(ResultChart::new(&spec).offset(5).first_bar(10), 5);
        assert_eq!(ResultChart::new(&spec).offset(39).first_bar(10), 30);
        assert_eq!(ResultChart::new(&spec).offset(39).bars(30, 10).len(), 10);
    }

    #[test]
    fn test_title_shows_visible_range() {
        let labels: Vec<String> = (0..40).map(|i| format!("state-{i}")).collect();
        let values: Vec<(&str, f64)> = labels.iter().map(|l| (l.as_str(), 1.0)).collect();
        let spec = spec(&values);
        let area = Rect::new(0, 0, 80, 12);
        let mut buf = Buffer::empty(area);
        ResultChart::new(&spec).offset(20).render(area, &mut buf);

        let top: String = (0..area.width).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert!(top.contains("[21-30 of 40]"));
    }

    #[test]
    fn test_renders_labels_and_values() {
        let spec = spec(&[("Recharge", 100.0), ("P2P", 50.0)]);
        let area = Rect::new(0, 0, 60, 6);
        let mut buf = Buffer::empty(area);
        ResultChart::new(&spec).render(area, &mut buf);

        let text: String = (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n");
        assert!(text.contains("Recharge"));
        assert!(text.contains("P2P"));
        assert!(text.contains("100"));
    }
}
