//! # Loader Component
//!
//! Spinner shown above the transcript while a request is in flight.
//! The frame counter is owned by `TuiState` and advanced by the event loop.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::tui::component::Component;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const LABEL: &str = "Muse is thinking...";

/// Rows the loader occupies, borders included.
pub const HEIGHT: u16 = 3;

pub struct Loader {
    pub spinner_frame: usize,
}

impl Loader {
    pub fn new(spinner_frame: usize) -> Self {
        Self { spinner_frame }
    }

    fn glyph(&self) -> &'static str {
        SPINNER[self.spinner_frame % SPINNER.len()]
    }
}

impl Component for Loader {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled(self.glyph(), Style::default().fg(Color::Cyan)),
            Span::raw(" "),
            Span::styled(LABEL, Style::default().fg(Color::Gray)),
        ]);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(Color::Rgb(30, 30, 36)));
        frame.render_widget(
            Paragraph::new(line).alignment(Alignment::Center).block(block),
            area,
        );
    }
}
