//! Terminal user interface for the dashboard.
//!
//! One interaction runs one query: every control change or reload awaits
//! [`Dashboard::show`] before the next frame is drawn.

pub mod app;
mod events;
pub mod headless;
mod ui;
pub mod widgets;

pub use app::{App, AppAction};
pub use events::{Event, EventHandler};

use crate::dashboard::{Dashboard, Notice};
use crate::error::{DashboardError, Result};
use crate::selection::Selection;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;
use tracing::{debug, info};

/// The interactive dashboard runner.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_handler: EventHandler,
}

impl Tui {
    /// Creates a new TUI instance, initializing the terminal.
    pub fn new() -> Result<Self> {
        Ok(Self {
            terminal: Self::setup_terminal()?,
            event_handler: EventHandler::new(),
        })
    }

    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()
            .map_err(|e| DashboardError::internal(format!("Failed to enable raw mode: {e}")))?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|e| {
            DashboardError::internal(format!("Failed to enter alternate screen: {e}"))
        })?;

        Terminal::new(CrosstermBackend::new(stdout))
            .map_err(|e| DashboardError::internal(format!("Failed to create terminal: {e}")))
    }

    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()
            .map_err(|e| DashboardError::internal(format!("Failed to disable raw mode: {e}")))?;

        execute!(self.terminal.backend_mut(), LeaveAlternateScreen).map_err(|e| {
            DashboardError::internal(format!("Failed to leave alternate screen: {e}"))
        })?;

        self.terminal
            .show_cursor()
            .map_err(|e| DashboardError::internal(format!("Failed to show cursor: {e}")))
    }

    fn draw(&mut self, app: &App, loading: bool) -> Result<()> {
        self.terminal
            .draw(|frame| ui::render(frame, app, loading))
            .map_err(|e| DashboardError::internal(format!("Failed to draw: {e}")))?;
        Ok(())
    }

    /// Shows the current selection, drawing a loading frame first.
    async fn refresh(&mut self, app: &mut App, dashboard: &Dashboard) -> Result<()> {
        self.draw(app, true)?;
        let presentation = dashboard.show(app.selection()).await;
        app.set_presentation(presentation);
        Ok(())
    }

    /// Runs the event loop until the user quits.
    pub async fn run(&mut self, dashboard: &Dashboard, mut app: App) -> Result<()> {
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            original_hook(panic_info);
        }));

        self.refresh(&mut app, dashboard).await?;

        while app.running {
            self.draw(&app, false)?;

            match self.event_handler.next()? {
                Event::Key(key) => match app.handle_key(key) {
                    AppAction::Refresh => {
                        debug!("Selection changed to {}", app.selection());
                        self.refresh(&mut app, dashboard).await?;
                    }
                    AppAction::Quit => info!("Quit requested"),
                    AppAction::None => {}
                },
                Event::Resize(..) | Event::Tick => {}
            }
        }

        let _ = panic::take_hook();
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}

/// Runs the interactive dashboard starting at `selection`.
pub async fn run(
    dashboard: &Dashboard,
    selection: Selection,
    startup_notices: Vec<Notice>,
) -> Result<()> {
    let app = App::new(dashboard.connection(), startup_notices).with_selection(selection);
    let mut tui = Tui::new()?;
    tui.run(dashboard, app).await
}
