//! Headless mode for scripting and automated checks.
//!
//! Shows one selection without a terminal: the dashboard runs the pipeline,
//! the regular UI draws into an in-memory backend, and the resulting screen
//! (or the presentation as JSON) is returned.

mod output;

pub use output::{HeadlessOutput, OutputFormat, ScreenRenderer};

use crate::dashboard::{Dashboard, Notice, Presentation};
use crate::error::{DashboardError, Result};
use crate::selection::Selection;
use crate::tui::app::App;
use crate::tui::ui;
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::time::{Duration, Instant};

/// Screen size and output format for a headless run.
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    pub width: u16,
    pub height: u16,
    pub output_format: OutputFormat,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            width: 120,
            height: 40,
            output_format: OutputFormat::Text,
        }
    }
}

impl HeadlessConfig {
    /// Parses a `WIDTHxHEIGHT` screen size.
    pub fn parse_size(size: &str) -> Result<(u16, u16)> {
        let invalid = || {
            DashboardError::config(format!(
                "Invalid size format: '{size}'. Expected WIDTHxHEIGHT (e.g., 120x40)"
            ))
        };
        let (width, height) = size.split_once('x').ok_or_else(invalid)?;
        let width = width.trim().parse::<u16>().map_err(|_| invalid())?;
        let height = height.trim().parse::<u16>().map_err(|_| invalid())?;
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        Ok((width, height))
    }
}

/// Outcome of a headless run.
#[derive(Debug)]
pub struct HeadlessResult {
    pub screen: String,
    pub screen_lines: Vec<String>,
    pub presentation: Presentation,
    pub duration: Duration,
}

/// Runs one selection through the dashboard and captures the screen.
pub async fn run(
    dashboard: &Dashboard,
    selection: Selection,
    startup_notices: Vec<Notice>,
    config: &HeadlessConfig,
) -> Result<HeadlessResult> {
    let start = Instant::now();
    let presentation = dashboard.show(selection).await;

    let mut app = App::new(dashboard.connection(), startup_notices).with_selection(selection);
    app.set_presentation(presentation.clone());

    let lines = draw(&app, config.width, config.height)?;
    Ok(HeadlessResult {
        screen: if lines.is_empty() {
            "\n".to_string()
        } else {
            format!("{}\n", lines.join("\n"))
        },
        screen_lines: lines,
        presentation,
        duration: start.elapsed(),
    })
}

/// Draws the app once into an in-memory terminal.
pub fn draw(app: &App, width: u16, height: u16) -> Result<Vec<String>> {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| DashboardError::internal(format!("Failed to create terminal: {e}")))?;
    terminal
        .draw(|frame| ui::render(frame, app, false))
        .map_err(|e| DashboardError::internal(format!("Failed to draw: {e}")))?;
    Ok(ScreenRenderer::lines(terminal.backend().buffer()))
}
