//! # Heading Component
//!
//! Two-line page header.
//!
//! ```text
//!  Conversation │ Code Generation                    3/5 free generations
//!  Our most advanced conversation model. | Opening checkout...
//! ```
//!
//! The active tool is highlighted in its own color. The usage counter is
//! right-aligned and omitted until the first usage refresh lands. The status
//! message follows the description when present.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::api::Usage;
use crate::core::tool::Tool;
use crate::tui::component::Component;

pub struct Heading<'a> {
    pub tool: Tool,
    pub usage: Option<Usage>,
    pub status_message: &'a str,
}

impl<'a> Heading<'a> {
    pub fn new(tool: Tool, usage: Option<Usage>, status_message: &'a str) -> Self {
        Self {
            tool,
            usage,
            status_message,
        }
    }
}

/// Accent color per tool, used for the active tab.
pub fn tool_color(tool: Tool) -> Color {
    match tool {
        Tool::Conversation => Color::Magenta,
        Tool::Code => Color::Green,
    }
}

impl Component for Heading<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if area.height == 0 {
            return;
        }

        let mut tabs = Vec::new();
        for (i, tool) in Tool::ALL.into_iter().enumerate() {
            if i > 0 {
                tabs.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
            }
            let style = if tool == self.tool {
                Style::default()
                    .fg(tool_color(tool))
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            tabs.push(Span::styled(tool.title(), style));
        }
        let top = Rect { height: 1, ..area };
        frame.render_widget(Paragraph::new(Line::from(tabs)), top);

        if let Some(usage) = self.usage {
            let label = Paragraph::new(usage.label())
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Right);
            frame.render_widget(label, top);
        }

        if area.height < 2 {
            return;
        }
        let mut second = vec![Span::styled(
            self.tool.description(),
            Style::default().fg(Color::Gray),
        )];
        if !self.status_message.is_empty() {
            second.push(Span::raw(" | "));
            second.push(Span::styled(
                self.status_message.to_string(),
                Style::default().fg(Color::Yellow),
            ));
        }
        let bottom = Rect {
            y: area.y + 1,
            height: 1,
            ..area
        };
        frame.render_widget(Paragraph::new(Line::from(second)), bottom);
    }
}
