//! Header bar: application name, current selection, and database.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::Widget,
};

pub struct Header<'a> {
    connection_info: &'a str,
    selection: Option<String>,
    loading: bool,
}

impl<'a> Header<'a> {
    pub fn new(connection_info: &'a str, selection: Option<String>, loading: bool) -> Self {
        Self {
            connection_info,
            selection,
            loading,
        }
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = Style::default()
            .bg(Color::Magenta)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        for x in area.left()..area.right() {
            buf[(x, area.y)].set_style(style);
        }

        let left = format!(" PhonePe Pulse Insights v{}", env!("CARGO_PKG_VERSION"));
        buf.set_span(area.x, area.y, &Span::styled(left, style), area.width);

        let center = match (&self.selection, self.loading) {
            (_, true) => Some("Loading...".to_string()),
            (Some(selection), false) => Some(selection.clone()),
            (None, false) => None,
        };
        if let Some(text) = center {
            let width = text.chars().count() as u16;
            let x = area.x + area.width.saturating_sub(width) / 2;
            let center_style = style.fg(if self.loading {
                Color::Yellow
            } else {
                Color::White
            });
            buf.set_string(x, area.y, &text, center_style);
        }

        let right = format!(" [db: {}] ", self.connection_info);
        let right_width = right.chars().count() as u16;
        if right_width < area.width {
            let x = area.right().saturating_sub(right_width);
            buf.set_string(x, area.y, &right, style);
        }
    }
}
