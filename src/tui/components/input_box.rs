//! # InputBox Component
//!
//! The prompt form: one line of text plus a Generate button.
//!
//! ## Responsibilities
//!
//! - Capture and edit a single-line prompt (insert, delete, cursor moves, paste)
//! - Emit `Submit` on Enter when the prompt is non-blank and the form is enabled
//! - Show a placeholder when empty and a disabled look while a request runs
//!
//! The buffer is NOT cleared on submit. The parent clears it once the reply
//! has been recorded, so a failed request leaves the prompt in place.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Rows taken by the bordered field.
pub const HEIGHT: u16 = 3;
const BUTTON_LABEL: &str = " Generate ";

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Submit(String),
    ContentChanged,
}

pub struct InputBox {
    pub buffer: String,
    /// Example prompt shown while the buffer is empty (prop)
    pub placeholder: &'static str,
    /// True while a request is in flight (prop)
    pub disabled: bool,
    /// Byte offset into `buffer`, always on a char boundary
    cursor: usize,
}

impl InputBox {
    pub fn new(placeholder: &'static str) -> Self {
        Self {
            buffer: String::new(),
            placeholder,
            disabled: false,
            cursor: 0,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    fn insert_str(&mut self, text: &str) {
        // Single-line field: fold line breaks into spaces
        let cleaned: String = text
            .chars()
            .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
            .collect();
        self.buffer.insert_str(self.cursor, &cleaned);
        self.cursor += cleaned.len();
    }

    fn prev_boundary(&self) -> usize {
        self.buffer[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.buffer[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
            .unwrap_or(self.buffer.len())
    }

    /// Returns the visible slice of the buffer and the cursor column within it,
    /// scrolling horizontally so the cursor stays in view.
    fn viewport(&self, width: u16) -> (&str, u16) {
        let width = width as usize;
        if width == 0 {
            return ("", 0);
        }
        let mut start = 0;
        let mut before = self.buffer[..self.cursor].width();
        // Drop leading chars until the cursor fits (leave one cell for it)
        while before >= width {
            let Some(c) = self.buffer[start..].chars().next() else {
                break;
            };
            before -= c.width().unwrap_or(0);
            start += c.len_utf8();
        }
        let mut end = start;
        let mut used = 0;
        for c in self.buffer[start..].chars() {
            let w = c.width().unwrap_or(0);
            if used + w > width {
                break;
            }
            used += w;
            end += c.len_utf8();
        }
        (&self.buffer[start..end], before as u16)
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let button_width = BUTTON_LABEL.width() as u16 + 2;
        let [field_area, button_area] =
            Layout::horizontal([Constraint::Min(1), Constraint::Length(button_width)]).areas(area);

        let border_style = if self.disabled {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Gray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title("Prompt");
        let inner = block.inner(field_area);

        let (visible, cursor_col) = self.viewport(inner.width);
        let line = if self.buffer.is_empty() {
            Line::from(Span::styled(
                self.placeholder,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ))
        } else {
            let fg = if self.disabled { Color::DarkGray } else { Color::White };
            Line::from(Span::styled(visible.to_string(), Style::default().fg(fg)))
        };
        frame.render_widget(Paragraph::new(line).block(block), field_area);

        let button_style = if self.disabled {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
        } else {
            Style::default().fg(Color::Black).bg(Color::White)
        };
        let button = Paragraph::new(Line::from(Span::styled(BUTTON_LABEL, button_style)))
            .block(Block::bordered().border_type(BorderType::Rounded).border_style(border_style));
        frame.render_widget(button, button_area);

        if !self.disabled && inner.width > 0 && inner.height > 0 {
            frame.set_cursor_position((inner.x + cursor_col.min(inner.width - 1), inner.y));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if self.disabled {
            return None;
        }
        match event {
            TuiEvent::InputChar(c) => {
                let mut tmp = [0u8; 4];
                self.insert_str(c.encode_utf8(&mut tmp));
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                self.insert_str(text);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => (self.cursor > 0).then(|| {
                let prev = self.prev_boundary();
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                InputEvent::ContentChanged
            }),
            TuiEvent::Delete => (self.cursor < self.buffer.len()).then(|| {
                let next = self.next_boundary();
                self.buffer.drain(self.cursor..next);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorLeft => (self.cursor > 0).then(|| {
                self.cursor = self.prev_boundary();
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorRight => (self.cursor < self.buffer.len()).then(|| {
                self.cursor = self.next_boundary();
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorHome => (self.cursor != 0).then(|| {
                self.cursor = 0;
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorEnd => (self.cursor != self.buffer.len()).then(|| {
                self.cursor = self.buffer.len();
                InputEvent::ContentChanged
            }),
            TuiEvent::Submit => {
                (!self.buffer.trim().is_empty()).then(|| InputEvent::Submit(self.buffer.clone()))
            }
            _ => None,
        }
    }
}
