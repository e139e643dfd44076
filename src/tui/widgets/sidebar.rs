//! Navigation sidebar.
//!
//! Lists the page choice, then the view or topic list, then the quarter or
//! query-ordinal control. The focused group has a highlighted border.

use crate::selection::{CaseStudyTopic, HomeView, Page, Quarter, QueryOrdinal};
use crate::tui::app::{App, Focus};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct Sidebar<'a> {
    app: &'a App,
}

impl<'a> Sidebar<'a> {
    pub fn new(app: &'a App) -> Self {
        Self { app }
    }

    fn block(&self, title: &'static str, focus: Focus) -> Block<'static> {
        let border_style = if self.app.focus == focus {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {title} "))
    }

    fn primary_items(&self) -> (Vec<&'static str>, usize, &'static str) {
        match self.app.page {
            Page::Home => (
                HomeView::LABELS.to_vec(),
                self.app.home_view(),
                "Select a visualization",
            ),
            Page::CaseStudy => (
                CaseStudyTopic::ALL.iter().map(|t| t.label()).collect(),
                self.app.topic.position(),
                "Select a topic",
            ),
        }
    }

    fn secondary_line(&self) -> Option<(&'static str, Line<'static>)> {
        if !self.app.has_secondary() {
            return None;
        }
        match self.app.page {
            Page::Home => {
                let q = self.app.quarter;
                let spans = Quarter::all()
                    .map(|candidate| marker(format!("Q{candidate}"), candidate == q))
                    .collect::<Vec<_>>();
                Some(("Quarter", Line::from(spaced(spans))))
            }
            Page::CaseStudy => {
                let o = self.app.ordinal;
                let spans = QueryOrdinal::all()
                    .map(|candidate| marker(candidate.get().to_string(), candidate == o))
                    .collect::<Vec<_>>();
                Some(("Query", Line::from(spaced(spans))))
            }
        }
    }
}

fn marker(text: String, selected: bool) -> Span<'static> {
    if selected {
        Span::styled(
            format!("[{text}]"),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::raw(format!(" {text} "))
    }
}

fn spaced(spans: Vec<Span<'static>>) -> Vec<Span<'static>> {
    spans
        .into_iter()
        .flat_map(|s| [s, Span::raw(" ")])
        .collect()
}

fn list(items: &[&'static str], selected: usize) -> Vec<Line<'static>> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            if i == selected {
                Line::from(Span::styled(
                    format!("> {item}"),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(format!("  {item}"))
            }
        })
        .collect()
}

impl Widget for Sidebar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (items, selected, primary_title) = self.primary_items();
        let page_index = Page::ALL.iter().position(|p| *p == self.app.page).unwrap_or(0);
        let secondary = self.secondary_line();

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(Page::ALL.len() as u16 + 2),
                Constraint::Length(items.len() as u16 + 2),
                Constraint::Length(if secondary.is_some() { 3 } else { 0 }),
                Constraint::Min(0),
            ])
            .split(area);

        let pages: Vec<&'static str> = Page::ALL.iter().map(|p| p.label()).collect();
        Paragraph::new(list(&pages, page_index))
            .block(self.block("Navigation", Focus::Page))
            .render(layout[0], buf);

        Paragraph::new(list(&items, selected))
            .block(self.block(primary_title, Focus::Primary))
            .render(layout[1], buf);

        if let Some((title, line)) = secondary {
            Paragraph::new(line)
                .block(self.block(title, Focus::Secondary))
                .render(layout[2], buf);
        }

        Paragraph::new("Tab: next control\n↑/↓: change\nPgUp/PgDn: scroll table\n[/]: scroll chart\nr: reload\nq: quit")
            .style(Style::default().fg(Color::DarkGray))
            .render(layout[3], buf);
    }
}
