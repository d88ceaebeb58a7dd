//! # Empty State Component
//!
//! Shown in the body of a page that has no messages and no request running.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::tool::Tool;
use crate::tui::component::Component;
use crate::tui::components::heading::tool_color;

const ICON: [&str; 3] = ["╭───╮", "│ ✦ │", "╰───╯"];

pub struct EmptyState {
    pub tool: Tool,
}

impl EmptyState {
    pub fn new(tool: Tool) -> Self {
        Self { tool }
    }
}

impl Component for EmptyState {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut lines: Vec<Line> = ICON
            .iter()
            .map(|row| {
                Line::from(Span::styled(
                    *row,
                    Style::default()
                        .fg(tool_color(self.tool))
                        .add_modifier(Modifier::DIM),
                ))
            })
            .collect();
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            self.tool.empty_label(),
            Style::default().fg(Color::DarkGray),
        )));

        let [block] = Layout::vertical([Constraint::Length(lines.len() as u16)])
            .flex(Flex::Center)
            .areas(area);
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), block);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(tool: Tool) -> String {
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        terminal
            .draw(|f| EmptyState::new(tool).render(f, f.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn label_follows_tool() {
        assert!(draw(Tool::Conversation).contains("No conversation started."));
        assert!(draw(Tool::Code).contains("No code generated."));
    }
}
