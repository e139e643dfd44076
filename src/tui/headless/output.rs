//! Output formatting for headless mode.

use super::HeadlessResult;
use crate::dashboard::Presentation;
use crate::error::DashboardError;
use ratatui::buffer::Buffer;
use serde::Serialize;
use std::str::FromStr;

/// Output format for headless mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// The rendered screen as plain text.
    #[default]
    Text,
    /// The presentation plus the rendered screen, as JSON.
    Json,
}

impl FromStr for OutputFormat {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(DashboardError::config(format!(
                "Invalid output format: {s}. Expected: text or json"
            ))),
        }
    }
}

/// Reads a ratatui buffer back as text.
pub struct ScreenRenderer;

impl ScreenRenderer {
    /// Returns the buffer's rows without trailing spaces or trailing empty rows.
    pub fn lines(buffer: &Buffer) -> Vec<String> {
        let area = buffer.area;
        let mut lines: Vec<String> = (0..area.height)
            .map(|y| {
                let line: String = (0..area.width)
                    .filter_map(|x| buffer.cell((area.x + x, area.y + y)))
                    .map(|cell| cell.symbol())
                    .collect();
                line.trim_end_matches(' ').to_string()
            })
            .collect();

        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        lines
    }
}

#[derive(Debug, Serialize)]
struct JsonOutput<'a> {
    presentation: &'a Presentation,
    screen_lines: &'a [String],
    duration_ms: u64,
}

/// Formats headless results.
pub struct HeadlessOutput {
    format: OutputFormat,
}

impl HeadlessOutput {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self, result: &HeadlessResult) -> String {
        match self.format {
            OutputFormat::Text => result.screen.clone(),
            OutputFormat::Json => {
                let output = JsonOutput {
                    presentation: &result.presentation,
                    screen_lines: &result.screen_lines,
                    duration_ms: result.duration.as_millis() as u64,
                };
                serde_json::to_string_pretty(&output)
                    .unwrap_or_else(|e| format!("{{\"error\": \"Failed to serialize: {e}\"}}"))
            }
        }
    }
}
