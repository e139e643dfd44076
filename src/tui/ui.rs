//! Screen layout.
//!
//! ```text
//! ┌ header ──────────────────────────────────────┐
//! │ sidebar │ heading                            │
//! │         │ notices                            │
//! │         │ result table                       │
//! │         │ bar chart                          │
//! └──────────────────────────────────────────────┘
//! ```

use super::app::App;
use super::widgets::{chart::ResultChart, header::Header, sidebar::Sidebar, table::ResultTable};
use crate::dashboard::{Notice, NoticeLevel, Presentation};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const SIDEBAR_WIDTH: u16 = 34;

/// Renders the entire UI.
pub fn render(frame: &mut Frame, app: &App, loading: bool) {
    let area = frame.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);

    let selection = app.presentation.as_ref().map(|p| p.selection.to_string());
    frame.render_widget(Header::new(&app.connection_info, selection, loading), rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(rows[1]);

    frame.render_widget(Sidebar::new(app), columns[0]);
    render_main(frame, columns[1], app);
}

fn render_main(frame: &mut Frame, area: Rect, app: &App) {
    let notices: Vec<&Notice> = app
        .startup_notices
        .iter()
        .chain(app.presentation.iter().flat_map(|p| p.notices.iter()))
        .collect();

    let notice_height = notice_lines(&notices, area.width);

    let Some(presentation) = &app.presentation else {
        let layout = split_notices(area, notice_height);
        render_notices(frame, layout[0], &notices);
        frame.render_widget(
            Paragraph::new("Loading...").style(Style::default().fg(Color::DarkGray)),
            layout[1],
        );
        return;
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(notice_height),
            Constraint::Min(3),
        ])
        .split(area);

    render_heading(frame, layout[0], presentation);
    render_notices(frame, layout[1], &notices);
    render_results(frame, layout[2], app, presentation);
}

fn split_notices(area: Rect, height: u16) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(height), Constraint::Min(1)])
        .split(area)
}

/// Rows the notices take once word-wrapped to `width`.
fn notice_lines(notices: &[&Notice], width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let lines: usize = notices
        .iter()
        .map(|notice| wrapped_rows(&notice.message, width))
        .sum();
    u16::try_from(lines).unwrap_or(u16::MAX)
}

fn wrapped_rows(text: &str, width: usize) -> usize {
    let mut rows = 1;
    let mut current = 0;
    for word in text.split_whitespace() {
        let len = word.chars().count();
        if current == 0 {
            current = len;
        } else if current + 1 + len <= width {
            current += 1 + len;
        } else {
            rows += 1;
            current = len;
        }
        while current > width {
            rows += 1;
            current -= width;
        }
    }
    rows
}

fn render_heading(frame: &mut Frame, area: Rect, presentation: &Presentation) {
    let heading = Line::from(Span::styled(
        format!(" {}", presentation.heading),
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(heading), area);
}

fn render_notices(frame: &mut Frame, area: Rect, notices: &[&Notice]) {
    let lines: Vec<Line> = notices
        .iter()
        .map(|notice| {
            let color = match notice.level {
                NoticeLevel::Warning => Color::Yellow,
                NoticeLevel::Error => Color::Red,
            };
            Line::from(Span::styled(
                format!(" {}", notice.message),
                Style::default().fg(color),
            ))
        })
        .collect();
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

fn render_results(frame: &mut Frame, area: Rect, app: &App, presentation: &Presentation) {
    let Some(table) = &presentation.table else {
        return;
    };

    let chart_height = presentation
        .chart
        .as_ref()
        .map_or(0, |chart| (chart.len() as u16 + 2).min(area.height / 2));

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(chart_height)])
        .split(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Result ");
    let inner = block.inner(layout[0]);
    frame.render_widget(block, layout[0]);

    let lines = ResultTable::new(table).render_to_lines(inner.width as usize);
    let max_scroll = lines.len().saturating_sub(usize::from(inner.height));
    let scroll = app.scroll.min(u16::try_from(max_scroll).unwrap_or(u16::MAX));
    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);

    if let Some(chart) = &presentation.chart {
        frame.render_widget(
            ResultChart::new(chart).offset(app.chart_scroll),
            layout[1],
        );
    }
}
