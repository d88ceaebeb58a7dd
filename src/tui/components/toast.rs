//! # Toast Component
//!
//! One-line error notification drawn over the bottom edge of the screen.
//! Expiry is decided in `core`; this only draws what it is given.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::Component;

const HEIGHT: u16 = 3;
const ICON: &str = "✕ ";

pub struct Toast<'a> {
    pub message: &'a str,
}

impl<'a> Toast<'a> {
    pub fn new(message: &'a str) -> Self {
        Self { message }
    }

    /// Bottom-centered box sized to the message.
    fn area(&self, outer: Rect) -> Rect {
        let width = (ICON.width() + self.message.width() + 4) as u16;
        let width = width.min(outer.width);
        let height = HEIGHT.min(outer.height);
        Rect {
            x: outer.x + (outer.width - width) / 2,
            y: outer.y + outer.height - height,
            width,
            height,
        }
    }
}

impl Component for Toast<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let rect = self.area(area);
        let style = Style::default().fg(Color::Red);
        let line = Line::from(vec![
            Span::styled(ICON, style.add_modifier(Modifier::BOLD)),
            Span::styled(self.message.to_string(), style),
        ]);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(style);

        frame.render_widget(Clear, rect);
        frame.render_widget(Paragraph::new(line).block(block), rect);
    }
}
