use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Text;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::api::{self, Role};
use crate::tui::markdown;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// Renders one transcript entry as a bordered block.
///
/// User messages get a bright border; assistant replies sit on a muted
/// background, mirroring the two bubble styles of the web pages.
/// On the code page the content is markdown, otherwise plain text.
#[derive(Clone, Copy)]
pub struct Message<'a> {
    pub message: &'a api::Message,
    pub markdown: bool,
}

impl<'a> Message<'a> {
    pub fn new(message: &'a api::Message, markdown: bool) -> Self {
        Self { message, markdown }
    }

    fn body(message: &api::Message, markdown: bool) -> Text<'static> {
        let fg = role_style(message.role).fg.unwrap_or(Color::Reset);
        if markdown {
            markdown::render(&message.content, fg)
        } else {
            Text::styled(message.content.trim().to_string(), Style::default().fg(fg))
        }
    }

    /// Predicts the rendered height at `width` without drawing.
    ///
    /// Wraps every body line with `textwrap` using the same rules as the
    /// `Paragraph` below, so the list can size its scroll canvas up front.
    pub fn calculate_height(message: &api::Message, markdown: bool, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            return 1;
        }

        let body = Self::body(message, markdown);
        if body.lines.iter().all(|l| l.width() == 0) {
            return VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let rows: usize = body
            .lines
            .iter()
            .map(|line| {
                let plain: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
                textwrap::wrap(&plain, &options).len().max(1)
            })
            .sum();
        (rows as u16).max(1) + VERTICAL_OVERHEAD
    }
}

pub fn role_label(role: Role) -> &'static str {
    match role {
        Role::User => "you",
        Role::Assistant => "muse",
    }
}

pub fn role_style(role: Role) -> Style {
    match role {
        Role::User => Style::default().fg(Color::White),
        Role::Assistant => Style::default().fg(Color::Gray).bg(Color::Rgb(30, 30, 36)),
    }
}

fn border_style(role: Role) -> Style {
    match role {
        Role::User => Style::default().fg(Color::Cyan),
        Role::Assistant => Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
    }
}

impl Widget for Message<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let role = self.message.role;
        let block = Block::bordered()
            .title(role_label(role))
            .border_type(BorderType::Rounded)
            .border_style(border_style(role))
            .title_style(border_style(role))
            .style(Style::default().bg(role_style(role).bg.unwrap_or(Color::Reset)))
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner = block.inner(area);
        block.render(area, buf);

        // Keep leading whitespace in code, trim prose like the web page does
        let wrap = Wrap { trim: !self.markdown };
        Paragraph::new(Self::body(self.message, self.markdown))
            .wrap(wrap)
            .render(inner, buf);
    }
}
