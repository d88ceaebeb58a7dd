//! # Actions
//!
//! Everything that can happen in Muse becomes an `Action`.
//! User presses Enter? That's `Action::Submit(prompt)`.
//! The service replies? That's `Action::ReplyReceived { .. }`.
//!
//! `update()` applies an action to the state and returns the `Effect` the
//! adapter must carry out. No I/O here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Replies are tagged with the id of the page that sent them. A page that has
//! been left no longer exists, so its reply is dropped.

use std::time::Instant;

use log::{debug, info, warn};
use uuid::Uuid;

use crate::api::{BackendError, Message, Usage};
use crate::core::state::{App, GENERIC_ERROR, Page, Toast};
use crate::core::tool::Tool;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Prompt submitted from the input field.
    Submit(String),
    ReplyReceived { page_id: Uuid, reply: Message },
    RequestFailed { page_id: Uuid, error: BackendError },
    UsageRefreshed(Usage),
    SwitchTool(Tool),
    /// User accepted the upgrade prompt.
    ConfirmUpgrade,
    UpgradeLinkReady(String),
    UpgradeLinkFailed(BackendError),
    DismissUpgrade,
    DismissToast,
    /// Clock tick, used to expire the toast.
    Tick(Instant),
    Quit,
}

/// Side effects requested by `update`, executed by the adapter.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// POST `messages` to the tool's endpoint on behalf of `page_id`.
    SpawnRequest {
        page_id: Uuid,
        tool: Tool,
        messages: Vec<Message>,
    },
    /// Re-read usage from the service. Runs after every attempt.
    Refresh { clear_input: bool },
    /// A new page was opened; the input field starts empty.
    ResetInput,
    FetchUpgradeLink,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(prompt) => submit(app, prompt),
        Action::ReplyReceived { page_id, reply } => {
            if page_id != app.page.id {
                warn!("Discarding reply for closed page {page_id}");
                return Effect::Refresh { clear_input: false };
            }
            let Some(user) = app.page.pending.take() else {
                warn!("Reply arrived with no request in flight");
                return Effect::Refresh { clear_input: false };
            };
            app.page.transcript.push_exchange(user, reply);
            info!(
                "Exchange recorded on {:?}, transcript length {}",
                app.page.tool,
                app.page.transcript.len()
            );
            Effect::Refresh { clear_input: true }
        }
        Action::RequestFailed { page_id, error } => {
            if page_id == app.page.id {
                app.page.pending = None;
            }
            if error.is_quota_exceeded() {
                info!("Quota exhausted, opening upgrade prompt");
                app.upgrade_open = true;
            } else {
                warn!("Request failed: {error}");
                app.toast = Some(Toast::error(GENERIC_ERROR, Instant::now()));
            }
            Effect::Refresh { clear_input: false }
        }
        Action::UsageRefreshed(usage) => {
            debug!("Usage refreshed: {usage:?}");
            app.usage = Some(usage);
            Effect::None
        }
        Action::SwitchTool(tool) => {
            if tool == app.page.tool {
                return Effect::None;
            }
            info!("Opening {:?} page", tool);
            app.page = Page::open(tool);
            Effect::ResetInput
        }
        Action::ConfirmUpgrade => {
            if app.upgrade_pending {
                return Effect::None;
            }
            app.upgrade_pending = true;
            app.status_message = String::from("Opening checkout...");
            Effect::FetchUpgradeLink
        }
        Action::UpgradeLinkReady(url) => {
            app.upgrade_pending = false;
            app.upgrade_open = false;
            app.status_message = format!("Upgrade at {url}");
            Effect::None
        }
        Action::UpgradeLinkFailed(error) => {
            warn!("Upgrade link request failed: {error}");
            app.upgrade_pending = false;
            app.status_message.clear();
            app.toast = Some(Toast::error(GENERIC_ERROR, Instant::now()));
            Effect::None
        }
        Action::DismissUpgrade => {
            app.upgrade_open = false;
            Effect::None
        }
        Action::DismissToast => {
            app.toast = None;
            Effect::None
        }
        Action::Tick(now) => {
            if app
                .toast
                .as_ref()
                .is_some_and(|t| t.is_expired(now, app.toast_duration))
            {
                app.toast = None;
            }
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn submit(app: &mut App, prompt: String) -> Effect {
    if prompt.trim().is_empty() {
        debug!("Ignoring empty prompt");
        return Effect::None;
    }
    if app.page.is_loading() {
        debug!("Ignoring submit while a request is in flight");
        return Effect::None;
    }

    let user = Message::user(prompt);
    let messages = app.page.transcript.with_pending(&user);
    app.page.pending = Some(user);
    info!(
        "Submitting {} message(s) to {:?}",
        messages.len(),
        app.page.tool
    );
    Effect::SpawnRequest {
        page_id: app.page.id,
        tool: app.page.tool,
        messages,
    }
}
