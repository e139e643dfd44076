//! Application state for the interactive dashboard.
//!
//! Holds the navigation controls and the last presentation. Key handling
//! only mutates state; it returns an [`AppAction`] telling the runner whether
//! the current selection must be shown again.

use crate::config::ConnectionConfig;
use crate::dashboard::{Notice, Presentation};
use crate::selection::{CaseStudyTopic, HomeView, Page, Quarter, QueryOrdinal, Selection};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Lines scrolled by one page key.
const PAGE: u16 = 10;

/// Borders, header, separator and footer drawn around the table rows.
const TABLE_FRAME_LINES: usize = 5;

/// Which control currently has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Page navigation.
    #[default]
    Page,
    /// Home view or case-study topic.
    Primary,
    /// Quarter slider or query ordinal.
    Secondary,
}

/// What the runner should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    None,
    /// The selection changed or a reload was requested.
    Refresh,
    Quit,
}

/// Main application state.
#[derive(Debug)]
pub struct App {
    pub page: Page,
    home_view: usize,
    pub quarter: Quarter,
    pub topic: CaseStudyTopic,
    pub ordinal: QueryOrdinal,
    pub focus: Focus,
    /// Result of the most recent interaction.
    pub presentation: Option<Presentation>,
    /// Warnings raised before the first query ran.
    pub startup_notices: Vec<Notice>,
    pub connection_info: String,
    /// Line offset into the result table.
    pub scroll: u16,
    /// Bar offset into the chart.
    pub chart_scroll: u16,
    pub running: bool,
}

impl App {
    pub fn new(connection: &ConnectionConfig, startup_notices: Vec<Notice>) -> Self {
        Self {
            page: Page::Home,
            home_view: 0,
            quarter: Quarter::FIRST,
            topic: CaseStudyTopic::DecodingTransactions,
            ordinal: QueryOrdinal::FIRST,
            focus: Focus::default(),
            presentation: None,
            startup_notices,
            connection_info: connection.display_string(),
            scroll: 0,
            chart_scroll: 0,
            running: true,
        }
    }

    /// Starts the controls at `selection`.
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.page = selection.page();
        match selection {
            Selection::Home { view } => {
                self.home_view = view.position();
                if let HomeView::StateWiseTrends(q) = view {
                    self.quarter = q;
                }
            }
            Selection::CaseStudy { topic, query } => {
                self.topic = topic;
                self.ordinal = query;
            }
        }
        self
    }

    /// The selection described by the current controls.
    pub fn selection(&self) -> Selection {
        match self.page {
            Page::Home => Selection::Home {
                view: HomeView::at(self.home_view, self.quarter)
                    .unwrap_or(HomeView::TransactionOverview),
            },
            Page::CaseStudy => Selection::CaseStudy {
                topic: self.topic,
                query: self.ordinal,
            },
        }
    }

    /// Position of the selected home view.
    pub fn home_view(&self) -> usize {
        self.home_view
    }

    /// Whether the secondary control applies to the current page and view.
    pub fn has_secondary(&self) -> bool {
        match self.page {
            Page::Home => matches!(
                HomeView::at(self.home_view, self.quarter),
                Some(HomeView::StateWiseTrends(_))
            ),
            Page::CaseStudy => true,
        }
    }

    /// Stores a finished presentation and resets scrolling.
    pub fn set_presentation(&mut self, presentation: Presentation) {
        self.presentation = Some(presentation);
        self.scroll = 0;
        self.chart_scroll = 0;
    }

    /// Last table line that can be scrolled to the top.
    fn max_scroll(&self) -> u16 {
        let lines = self
            .presentation
            .as_ref()
            .and_then(|p| p.table.as_ref())
            .map_or(0, |table| table.rows.len() + TABLE_FRAME_LINES);
        u16::try_from(lines.saturating_sub(1)).unwrap_or(u16::MAX)
    }

    /// Last bar that can be scrolled to the top of the chart.
    fn max_chart_scroll(&self) -> u16 {
        let bars = self
            .presentation
            .as_ref()
            .and_then(|p| p.chart.as_ref())
            .map_or(0, |chart| chart.len());
        u16::try_from(bars.saturating_sub(1)).unwrap_or(u16::MAX)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.running = false;
            return AppAction::Quit;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
                AppAction::Quit
            }
            KeyCode::Tab => {
                self.focus = self.next_focus(true);
                AppAction::None
            }
            KeyCode::BackTab => {
                self.focus = self.next_focus(false);
                AppAction::None
            }
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Right | KeyCode::Char('l') => {
                self.step(true)
            }
            KeyCode::Up | KeyCode::Char('k') | KeyCode::Left | KeyCode::Char('h') => {
                self.step(false)
            }
            KeyCode::Enter | KeyCode::Char('r') => AppAction::Refresh,
            KeyCode::PageDown => {
                self.scroll = self.scroll.saturating_add(PAGE).min(self.max_scroll());
                AppAction::None
            }
            KeyCode::PageUp => {
                self.scroll = self.scroll.saturating_sub(PAGE);
                AppAction::None
            }
            KeyCode::Char(']') => {
                self.chart_scroll = self
                    .chart_scroll
                    .saturating_add(PAGE)
                    .min(self.max_chart_scroll());
                AppAction::None
            }
            KeyCode::Char('[') => {
                self.chart_scroll = self.chart_scroll.saturating_sub(PAGE);
                AppAction::None
            }
            _ => AppAction::None,
        }
    }

    fn next_focus(&self, forward: bool) -> Focus {
        let order: &[Focus] = if self.has_secondary() {
            &[Focus::Page, Focus::Primary, Focus::Secondary]
        } else {
            &[Focus::Page, Focus::Primary]
        };
        let current = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        let len = order.len();
        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        order[next]
    }

    /// Moves the focused control one step and requests a refresh.
    fn step(&mut self, forward: bool) -> AppAction {
        match (self.focus, self.page) {
            (Focus::Page, _) => {
                self.page = match self.page {
                    Page::Home => Page::CaseStudy,
                    Page::CaseStudy => Page::Home,
                };
            }
            (Focus::Primary, Page::Home) => {
                let len = HomeView::LABELS.len();
                self.home_view = cycle(self.home_view, len, forward);
            }
            (Focus::Primary, Page::CaseStudy) => {
                let len = CaseStudyTopic::ALL.len();
                let position = cycle(self.topic.position(), len, forward);
                self.topic = CaseStudyTopic::ALL[position];
            }
            (Focus::Secondary, Page::Home) => {
                self.quarter = if forward {
                    self.quarter.next()
                } else {
                    self.quarter.prev()
                };
            }
            (Focus::Secondary, Page::CaseStudy) => {
                self.ordinal = if forward {
                    self.ordinal.next()
                } else {
                    self.ordinal.prev()
                };
            }
        }

        if !self.has_secondary() && self.focus == Focus::Secondary {
            self.focus = Focus::Primary;
        }
        AppAction::Refresh
    }
}

fn cycle(position: usize, len: usize, forward: bool) -> usize {
    if forward {
        (position + 1) % len
    } else {
        (position + len - 1) % len
    }
}
