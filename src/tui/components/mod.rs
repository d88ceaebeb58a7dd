//! # TUI Components
//!
//! All widgets that make up a tool page.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Receive everything they draw as fields, built fresh each frame:
//! - `Heading`: tool tabs, description, usage counter and status
//! - `Message`: one transcript entry
//! - `EmptyState`: placeholder when nothing has been generated yet
//! - `Loader`: spinner while a request is in flight
//! - `Toast`: transient error notification
//! - `UpgradeModal`: upsell overlay shown when the free quota is gone
//!
//! ### Stateful Components (Event-Driven)
//!
//! Own presentation state that survives between frames and emit events:
//! - `InputBox`: the prompt field and its Generate button
//! - `MessageList`: scrollable transcript with layout caching
//!
//! Data flows in as props, never by reaching into `App`:
//!
//! ```rust,ignore
//! Heading::new(app.page.tool, app.usage, &app.status_message).render(frame, area);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs            (this file)
//! ├── heading.rs        (tool tabs + usage)
//! ├── input_box.rs      (prompt field)
//! ├── message.rs        (single message renderer)
//! ├── message_list.rs   (newest-first transcript)
//! ├── empty_state.rs    (nothing generated yet)
//! ├── loader.rs         (request in flight)
//! ├── toast.rs          (error notification)
//! └── upgrade_modal.rs  (quota upsell)
//! ```

pub mod empty_state;
pub mod heading;
pub mod input_box;
pub mod loader;
pub mod message;
pub mod message_list;
pub mod toast;
pub mod upgrade_modal;

pub use empty_state::EmptyState;
pub use heading::Heading;
pub use input_box::{InputBox, InputEvent};
pub use loader::Loader;
pub use message_list::{MessageList, MessageListState};
pub use toast::Toast;
pub use upgrade_modal::{ModalEvent, UpgradeModal};

use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// Centers a `width` x `height` box inside `outer`, shrinking to fit.
pub(crate) fn centered(width: u16, height: u16, outer: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(outer.height))])
        .flex(Flex::Center)
        .areas(outer);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(outer.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}
