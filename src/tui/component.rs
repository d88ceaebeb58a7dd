use ratatui::Frame;
use ratatui::layout::Rect;

use super::event::TuiEvent;

/// Something that draws itself into a region of the frame.
///
/// Props arrive as struct fields, built fresh each frame. `render` takes
/// `&mut self` so components holding `&mut` state can update caches such as
/// measured heights or scroll offsets while drawing.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that turns raw terminal events into its own, higher-level events.
pub trait EventHandler {
    type Event;

    /// Returns `None` when the event was ignored or fully handled internally.
    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event>;
}
