//! # MessageList Component
//!
//! Scrollable transcript, newest message at the top.
//!
//! ## Responsibilities
//!
//! - Display the transcript in reverse chronological order
//! - Manage scrolling (stick to the top so fresh replies are in view)
//! - Cache per-message heights so only new messages get measured
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and the `Transcript` (props).
//! The transcript is append-only, so heights are cached by storage index and
//! only the tail is measured after each exchange. Display order is derived:
//! display row `d` shows storage index `len - 1 - d`.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::transcript::Transcript;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::Message;
use crate::tui::event::TuiEvent;

/// Vertical gap between two messages.
const GAP: u16 = 1;

/// Scroll and layout state for the transcript view.
/// Lives in `TuiState` and is reset whenever a new page opens.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    pub layout: LayoutCache,
    /// When true, keep the viewport at the top where new replies appear
    pub stick_to_top: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_top: true,
            viewport_height: 0,
        }
    }

    fn max_offset(&self) -> u16 {
        self.layout.total_height().saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position { x: current.x, y: max_y });
        }
    }

    /// Re-engage stick-to-top once the user scrolls back to the newest message.
    fn repin_if_at_top(&mut self) {
        if self.scroll_state.offset().y == 0 {
            self.stick_to_top = true;
        }
    }
}

impl Component for MessageList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar
        let messages = self.transcript.messages();

        // 1. Measure any messages not yet in the cache
        let layout = &mut self.state.layout;
        let reusable = layout.reusable_count(messages.len(), content_width, self.markdown);
        layout.heights.truncate(reusable);
        for message in &messages[layout.heights.len()..] {
            layout
                .heights
                .push(Message::calculate_height(message, self.markdown, content_width));
        }
        layout.update_metadata(messages.len(), content_width, self.markdown);
        layout.rebuild_prefix_heights();

        // 2. Clamp or pin the scroll offset
        self.state.viewport_height = area.height;
        if self.state.stick_to_top {
            self.state.scroll_state.scroll_to_top();
        } else {
            self.state.clamp_scroll();
        }

        // 3. Render the visible messages, newest first
        let total_height = self.state.layout.total_height();
        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let offset = self.state.scroll_state.offset().y;
        let visible = self.state.layout.visible_range(offset, area.height);
        let prefix = &self.state.layout.prefix_heights;

        for display_idx in visible {
            let storage_idx = messages.len() - 1 - display_idx;
            let top = if display_idx == 0 { 0 } else { prefix[display_idx - 1] };
            let height = self.state.layout.heights[storage_idx];
            let rect = Rect::new(0, top, content_width, height);
            scroll_view.render_widget(Message::new(&messages[storage_idx], self.markdown), rect);
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// Transient transcript view, created each frame.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub transcript: &'a Transcript,
    /// Render content as markdown (code page)
    pub markdown: bool,
}

impl<'a> MessageList<'a> {
    pub fn new(state: &'a mut MessageListState, transcript: &'a Transcript, markdown: bool) -> Self {
        Self {
            state,
            transcript,
            markdown,
        }
    }
}

/// Scrolling is handled on the persistent state; the list emits no events.
impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.repin_if_at_top();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.repin_if_at_top();
            }
            TuiEvent::ScrollDown => {
                self.stick_to_top = false;
                self.scroll_state.scroll_down();
                self.clamp_scroll();
            }
            TuiEvent::ScrollPageDown => {
                self.stick_to_top = false;
                self.scroll_state.scroll_page_down();
                self.clamp_scroll();
            }
            _ => {}
        }
        None
    }
}

/// Cached message heights.
///
/// `heights` is indexed by storage order. `prefix_heights` is indexed by
/// display order (newest first) and includes the gap after each message.
pub struct LayoutCache {
    pub heights: Vec<u16>,
    pub prefix_heights: Vec<u16>,
    message_count: usize,
    content_width: u16,
    markdown: bool,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            message_count: 0,
            content_width: 0,
            markdown: false,
        }
    }

    /// How many cached heights are still valid for the given transcript.
    pub fn reusable_count(&self, message_count: usize, content_width: u16, markdown: bool) -> usize {
        if self.content_width != content_width || self.markdown != markdown {
            return 0;
        }
        // Fewer messages than cached means a different transcript
        if message_count < self.message_count {
            return 0;
        }
        self.heights.len().min(message_count)
    }

    pub fn update_metadata(&mut self, message_count: usize, content_width: u16, markdown: bool) {
        self.message_count = message_count;
        self.content_width = content_width;
        self.markdown = markdown;
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .rev()
            .scan(0u16, |acc, &h| {
                *acc = acc.saturating_add(h).saturating_add(GAP);
                Some(*acc)
            })
            .collect();
    }

    pub fn total_height(&self) -> u16 {
        self.prefix_heights
            .last()
            .map(|h| h.saturating_sub(GAP))
            .unwrap_or(0)
    }

    /// Display indices that intersect the viewport, with half a screen of
    /// buffer on each side.
    pub fn visible_range(&self, scroll_offset: u16, viewport_height: u16) -> std::ops::Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end.max(start)
    }
}
