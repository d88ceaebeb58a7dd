//! # Upgrade Modal Component
//!
//! Centered overlay opened when the backend reports the free quota is used up.
//! Lists the tools unlocked by a Pro plan. Enter asks for a checkout link,
//! Esc closes the overlay.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Padding, Paragraph};

use crate::core::tool::Tool;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::centered;
use crate::tui::components::heading::tool_color;
use crate::tui::event::TuiEvent;

const WIDTH: u16 = 50;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModalEvent {
    Upgrade,
    Dismiss,
}

pub struct UpgradeModal {
    /// A checkout link has been requested and not yet answered
    pub pending: bool,
}

impl UpgradeModal {
    pub fn new(pending: bool) -> Self {
        Self { pending }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(Span::styled(
                "You have used all of your free generations.",
                Style::default().fg(Color::Gray),
            )),
            Line::default(),
        ];
        for tool in Tool::ALL {
            lines.push(Line::from(vec![
                Span::styled("● ", Style::default().fg(tool_color(tool))),
                Span::styled(
                    tool.title(),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled(
                    " PRO ",
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
        }
        lines.push(Line::default());
        let button = if self.pending { " Opening... " } else { " Upgrade ✦ " };
        lines.push(
            Line::from(Span::styled(
                button,
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ))
            .centered(),
        );
        lines
    }
}

impl Component for UpgradeModal {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = self.lines();
        // borders + body
        let overlay = centered(WIDTH, lines.len() as u16 + 2, area);
        frame.render_widget(Clear, overlay);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Magenta))
            .title(" Upgrade to Pro ")
            .title_alignment(Alignment::Center)
            .title_bottom(Line::from(" Enter Upgrade  Esc Close ").centered())
            .padding(Padding::horizontal(1));
        frame.render_widget(Paragraph::new(lines).block(block), overlay);
    }
}

impl EventHandler for UpgradeModal {
    type Event = ModalEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::Submit if !self.pending => Some(ModalEvent::Upgrade),
            TuiEvent::Escape => Some(ModalEvent::Dismiss),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn key_mapping() {
        let mut modal = UpgradeModal::new(false);
        assert_eq!(modal.handle_event(&TuiEvent::Submit), Some(ModalEvent::Upgrade));
        assert_eq!(modal.handle_event(&TuiEvent::Escape), Some(ModalEvent::Dismiss));
        assert_eq!(modal.handle_event(&TuiEvent::InputChar('x')), None);
    }

    #[test]
    fn pending_modal_ignores_enter() {
        let mut modal = UpgradeModal::new(true);
        assert_eq!(modal.handle_event(&TuiEvent::Submit), None);
        assert_eq!(modal.handle_event(&TuiEvent::Escape), Some(ModalEvent::Dismiss));
    }

    #[test]
    fn lists_both_tools() {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal
            .draw(|f| UpgradeModal::new(false).render(f, f.area()))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Upgrade to Pro"));
        assert!(text.contains("Conversation"));
        assert!(text.contains("Code Generation"));
        assert!(text.contains("PRO"));
    }
}
