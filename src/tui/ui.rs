//! Frame layout. Composes the components from `App` (read-only) and
//! `TuiState` (presentation state).
//!
//! ```text
//! ┌ heading ─────────────────────────────┐ 2 rows
//! ├ prompt field ───────────┬ Generate ──┤ 3 rows
//! ├ loader (while loading) ─────────────┤ 3 rows
//! │ transcript, newest first             │
//! │   or the empty state                 │
//! └──────────────────────────────────────┘
//!   toast / upgrade modal drawn on top
//! ```

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    EmptyState, Heading, Loader, MessageList, Toast, UpgradeModal, input_box, loader,
};

const HEADING_HEIGHT: u16 = 2;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let [heading_area, input_area, body_area] = Layout::vertical([
        Length(HEADING_HEIGHT),
        Length(input_box::HEIGHT),
        Min(0),
    ])
    .areas(frame.area());

    Heading::new(app.page.tool, app.usage, &app.status_message).render(frame, heading_area);
    tui.input_box.render(frame, input_area);
    draw_body(frame, body_area, app, tui);

    if let Some(toast) = &app.toast {
        Toast::new(&toast.message).render(frame, frame.area());
    }
    if app.upgrade_open {
        UpgradeModal::new(app.upgrade_pending).render(frame, frame.area());
    }
}

fn draw_body(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState) {
    let page = &app.page;
    if page.shows_empty_state() {
        EmptyState::new(page.tool).render(frame, area);
        return;
    }

    let list_area = if page.is_loading() {
        let [loader_area, rest] =
            Layout::vertical([Constraint::Length(loader::HEIGHT), Constraint::Min(0)]).areas(area);
        Loader::new(tui.spinner_frame).render(frame, loader_area);
        rest
    } else {
        area
    };

    if !page.transcript.is_empty() {
        MessageList::new(
            &mut tui.message_list,
            &page.transcript,
            page.tool.renders_markdown(),
        )
        .render(frame, list_area);
    }
}
