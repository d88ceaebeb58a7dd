//! Markdown → ratatui `Text` renderer for generated code replies.
//!
//! Walks `pulldown_cmark` events and emits styled lines. Fenced code blocks
//! become tinted panels (syntect-highlighted when the language is known),
//! inline code gets a tinted chip. Headings, emphasis, lists, quotes and
//! links are styled; tables, images and raw HTML are flattened to text.

use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// Background of code panels and inline code chips.
pub const CODE_BG: Color = Color::Rgb(40, 44, 52);
/// Foreground for code without a known syntax.
pub const CODE_FG: Color = Color::Gray;
/// Left gutter inside a code panel.
const PANEL_PAD: &str = " ";

/// Render markdown into owned styled text.
pub fn render(content: &str, base_fg: Color) -> Text<'static> {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_TASKLISTS);

    let mut r = Renderer::new(base_fg);
    for event in Parser::new_ext(content, opts) {
        r.event(event);
    }
    r.finish()
}

/// Code block being collected. The body is highlighted in one go at the end
/// because pulldown-cmark may split it across several `Text` events.
struct PendingCode {
    lang: String,
    body: String,
}

struct Renderer {
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    base: Style,
    inline: Vec<Style>,
    lists: Vec<Option<u64>>,
    quote_depth: usize,
    code: Option<PendingCode>,
    link: Option<String>,
    gap_before_block: bool,
}

impl Renderer {
    fn new(base_fg: Color) -> Self {
        Self {
            lines: Vec::new(),
            current: Vec::new(),
            base: Style::default().fg(base_fg),
            inline: Vec::new(),
            lists: Vec::new(),
            quote_depth: 0,
            code: None,
            link: None,
            gap_before_block: false,
        }
    }

    fn finish(mut self) -> Text<'static> {
        self.flush();
        Text::from(self.lines)
    }

    fn style(&self) -> Style {
        self.inline.last().copied().unwrap_or(self.base)
    }

    fn push_inline(&mut self, overlay: Style) {
        let next = self.style().patch(overlay);
        self.inline.push(next);
    }

    /// Ends the line under construction, if any.
    fn flush(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let mut spans = Vec::with_capacity(self.current.len() + 1);
        if self.quote_depth > 0 {
            spans.push(Span::styled(
                "│ ".repeat(self.quote_depth),
                Style::default().fg(Color::DarkGray),
            ));
        }
        spans.append(&mut self.current);
        self.lines.push(Line::from(spans));
    }

    fn start_block(&mut self) {
        self.flush();
        if self.gap_before_block && !self.lines.is_empty() {
            self.lines.push(Line::default());
        }
        self.gap_before_block = false;
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.open(tag),
            Event::End(tag) => self.close(tag),
            Event::Text(text) => {
                if let Some(code) = self.code.as_mut() {
                    code.body.push_str(&text);
                } else {
                    let style = self.style();
                    self.current.push(Span::styled(text.replace('\t', "    "), style));
                }
            }
            Event::Code(code) => {
                self.current.push(Span::styled(
                    format!(" {code} "),
                    Style::default().fg(Color::White).bg(CODE_BG),
                ));
            }
            Event::SoftBreak => self.current.push(Span::raw(" ")),
            Event::HardBreak => self.flush(),
            Event::Rule => {
                self.start_block();
                self.lines.push(Line::from(Span::styled(
                    "─".repeat(32),
                    Style::default().fg(Color::DarkGray),
                )));
                self.gap_before_block = true;
            }
            Event::TaskListMarker(done) => {
                self.current
                    .push(Span::raw(if done { "[x] " } else { "[ ] " }));
            }
            Event::Html(html) | Event::InlineHtml(html) => {
                let style = self.style();
                self.current.push(Span::styled(html.trim_end().to_string(), style));
            }
            _ => {}
        }
    }

    fn open(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                // Paragraphs inside list items stay on the bullet line
                if self.lists.is_empty() || !self.current.is_empty() {
                    self.start_block();
                }
            }
            Tag::Heading { level, .. } => {
                self.start_block();
                let style = heading_style(level);
                self.current.push(Span::styled(
                    format!("{} ", "#".repeat(level as usize)),
                    self.base.patch(style),
                ));
                self.push_inline(style);
            }
            Tag::BlockQuote(_) => {
                self.start_block();
                self.quote_depth += 1;
                self.push_inline(Style::default().add_modifier(Modifier::ITALIC));
            }
            Tag::CodeBlock(kind) => {
                self.start_block();
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => {
                        info.split_whitespace().next().unwrap_or_default().to_string()
                    }
                    CodeBlockKind::Indented => String::new(),
                };
                self.code = Some(PendingCode {
                    lang,
                    body: String::new(),
                });
            }
            Tag::List(start) => {
                if self.lists.is_empty() {
                    self.start_block();
                }
                self.lists.push(start);
            }
            Tag::Item => {
                self.flush();
                let indent = "  ".repeat(self.lists.len().saturating_sub(1));
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let m = format!("{indent}{n}. ");
                        *n += 1;
                        m
                    }
                    _ => format!("{indent}• "),
                };
                self.current
                    .push(Span::styled(marker, Style::default().fg(Color::DarkGray)));
            }
            Tag::Emphasis => self.push_inline(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_inline(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.push_inline(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::Link { dest_url, .. } => {
                self.link = Some(dest_url.to_string());
                self.push_inline(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::UNDERLINED),
                );
            }
            _ => {}
        }
    }

    fn close(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                if self.lists.is_empty() {
                    self.flush();
                    self.gap_before_block = true;
                }
            }
            TagEnd::Heading(_) => {
                self.inline.pop();
                self.flush();
                self.gap_before_block = true;
            }
            TagEnd::BlockQuote(_) => {
                self.flush();
                self.inline.pop();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.gap_before_block = true;
            }
            TagEnd::CodeBlock => {
                if let Some(code) = self.code.take() {
                    self.lines.extend(code_panel(&code.lang, &code.body));
                }
                self.gap_before_block = true;
            }
            TagEnd::List(_) => {
                self.flush();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.gap_before_block = true;
                }
            }
            TagEnd::Item => self.flush(),
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => {
                self.inline.pop();
            }
            TagEnd::Link => {
                self.inline.pop();
                if let Some(url) = self.link.take() {
                    self.current.push(Span::styled(
                        format!(" <{url}>"),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
            }
            _ => {}
        }
    }
}

/// Builds the lines of a tinted code panel, with a language caption when known.
fn code_panel(lang: &str, body: &str) -> Vec<Line<'static>> {
    let panel = Style::default().bg(CODE_BG);
    let mut out = Vec::new();
    if !lang.is_empty() {
        out.push(Line::from(Span::styled(
            format!("{PANEL_PAD}{lang}"),
            panel.fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    let body = body.strip_suffix('\n').unwrap_or(body);
    let syntax = (!lang.is_empty())
        .then(|| SYNTAX_SET.find_syntax_by_token(lang))
        .flatten();

    match syntax {
        Some(syntax) => {
            let mut hl = HighlightLines::new(syntax, &THEME_SET.themes["base16-ocean.dark"]);
            for line in LinesWithEndings::from(body) {
                let mut spans = vec![Span::styled(PANEL_PAD, panel)];
                match hl.highlight_line(line, &SYNTAX_SET) {
                    Ok(ranges) => {
                        for (style, frag) in ranges {
                            let frag = frag.trim_end_matches('\n').replace('\t', "    ");
                            if frag.is_empty() {
                                continue;
                            }
                            let fg = Color::Rgb(style.foreground.r, style.foreground.g, style.foreground.b);
                            spans.push(Span::styled(frag, panel.fg(fg)));
                        }
                    }
                    Err(e) => {
                        log::debug!("Highlighting failed for {lang}: {e}");
                        spans.push(Span::styled(
                            line.trim_end_matches('\n').replace('\t', "    "),
                            panel.fg(CODE_FG),
                        ));
                    }
                }
                out.push(Line::from(spans));
            }
        }
        None => {
            for line in body.lines() {
                out.push(Line::from(vec![
                    Span::styled(PANEL_PAD, panel),
                    Span::styled(line.replace('\t', "    "), panel.fg(CODE_FG)),
                ]));
            }
        }
    }
    out
}

fn heading_style(level: HeadingLevel) -> Style {
    match level {
        HeadingLevel::H1 => Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        HeadingLevel::H2 => Style::default().add_modifier(Modifier::BOLD),
        _ => Style::default().add_modifier(Modifier::BOLD | Modifier::ITALIC),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &Text) -> Vec<String> {
        text.lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn bash_block_renders_as_tinted_panel() {
        let text = render("```bash\nls\n```", Color::White);
        let lines = plain(&text);
        assert_eq!(lines[0].trim(), "bash");
        assert!(lines[1].contains("ls"));
        let code_span = text.lines[1].spans.iter().find(|s| s.content.contains("ls")).unwrap();
        assert_eq!(code_span.style.bg, Some(CODE_BG));
    }

    #[test]
    fn unknown_language_falls_back_to_plain_code() {
        let text = render("```nosuchlang\nfoo bar\n```", Color::White);
        let span = text.lines[1].spans.iter().find(|s| s.content == "foo bar").unwrap();
        assert_eq!(span.style.fg, Some(CODE_FG));
        assert_eq!(span.style.bg, Some(CODE_BG));
    }

    #[test]
    fn inline_code_is_a_chip() {
        let text = render("Call `main()` first", Color::White);
        let chip = text.lines[0].spans.iter().find(|s| s.content == " main() ").unwrap();
        assert_eq!(chip.style.bg, Some(CODE_BG));
    }

    #[test]
    fn heading_text_keeps_heading_style() {
        let text = render("## Setup", Color::Blue);
        let span = text.lines[0].spans.iter().find(|s| s.content == "Setup").unwrap();
        assert!(span.style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(span.style.fg, Some(Color::Blue));
    }

    #[test]
    fn paragraphs_separated_by_blank_line() {
        let lines = plain(&render("one\n\ntwo", Color::White));
        assert_eq!(lines, vec!["one", "", "two"]);
    }

    #[test]
    fn ordered_list_numbers_increment() {
        let lines = plain(&render("1. a\n2. b", Color::White));
        assert_eq!(lines, vec!["1. a", "2. b"]);
    }

    #[test]
    fn tabs_expanded() {
        let text = render("```\n\tx\n```", Color::White);
        assert!(plain(&text).iter().all(|l| !l.contains('\t')));
    }

    #[test]
    fn plain_text_uses_base_color() {
        let text = render("hello", Color::Green);
        assert_eq!(text.lines[0].spans[0].style.fg, Some(Color::Green));
    }
}
