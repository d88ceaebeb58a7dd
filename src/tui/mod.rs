//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates keyboard events into `core::Action` values and carries out
//! the `Effect`s that `update` returns.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Background Work
//!
//! Network calls run on tokio tasks. Each task reports back by sending an
//! `Action` over a std mpsc channel, which the loop drains between frames.
//! Nothing blocks the draw loop.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (request in flight or toast showing): draws every ~80ms so
//!   the spinner moves and the toast can expire on time.
//! - **Idle**: sleeps up to 500ms and only redraws on events or replies.

mod component;
mod components;
mod event;
pub mod markdown;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::api::{GenerationBackend, HttpBackend, Message};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::core::tool::Tool;
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, MessageListState, ModalEvent, UpgradeModal};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
    pub spinner_frame: usize,
}

impl TuiState {
    pub fn new(placeholder: &'static str) -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(placeholder),
            spinner_frame: 0,
        }
    }

    /// A new page was opened: drop the old scroll position and prompt.
    fn reset_page(&mut self, placeholder: &'static str) {
        self.message_list = MessageListState::new();
        self.input_box.clear();
        self.input_box.placeholder = placeholder;
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            // Non-blinking: draw() resets the blink timer on every frame
            SetCursorStyle::SteadyBlock,
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste, Hide);
    }
}

/// Build the HTTP backend from the resolved configuration.
pub fn build_backend(config: &ResolvedConfig) -> Arc<dyn GenerationBackend> {
    info!("Using backend at {}", config.base_url);
    Arc::new(HttpBackend::new(
        config.base_url.clone(),
        config.auth_token.clone(),
    ))
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let backend = build_backend(&config);
    let mut app = App::from_config(backend, &config);
    let mut tui = TuiState::new(app.page.placeholder);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // Show the counter from the start
    spawn_usage_refresh(&app, tx.clone());

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    'event_loop: loop {
        // Sync InputBox props with App state
        tui.input_box.disabled = app.is_loading();
        tui.input_box.placeholder = app.page.placeholder;

        let animating = app.is_loading() || app.toast.is_some();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            tui.spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if let Some(action) = route_event(&event, &app, &mut tui) {
                let effect = update(&mut app, action);
                if apply_effect(effect, &app, &mut tui, &tx) {
                    break 'event_loop;
                }
            }
        }

        // Replies, usage and checkout links from background tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            if apply_effect(effect, &app, &mut tui, &tx) {
                break 'event_loop;
            }
        }

        let had_toast = app.toast.is_some();
        update(&mut app, Action::Tick(Instant::now()));
        if had_toast && app.toast.is_none() {
            needs_redraw = true;
        }
    }

    info!("Muse shutting down");
    ratatui::restore();
    Ok(())
}

/// Turn a terminal event into an action, or handle it locally.
///
/// Precedence: Ctrl+C, then the upgrade modal (which captures everything
/// while open), then global keys, then the input field.
fn route_event(event: &TuiEvent, app: &App, tui: &mut TuiState) -> Option<Action> {
    match event {
        TuiEvent::ForceQuit => return Some(Action::Quit),
        TuiEvent::Resize => return None,
        _ => {}
    }

    if app.upgrade_open {
        return UpgradeModal::new(app.upgrade_pending)
            .handle_event(event)
            .map(|modal_event| match modal_event {
                ModalEvent::Upgrade => Action::ConfirmUpgrade,
                ModalEvent::Dismiss => Action::DismissUpgrade,
            });
    }

    match event {
        TuiEvent::Escape if app.toast.is_some() => Some(Action::DismissToast),
        TuiEvent::Escape => Some(Action::Quit),
        TuiEvent::NextTool => Some(Action::SwitchTool(app.page.tool.next())),
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.message_list.handle_event(event);
            None
        }
        _ => match tui.input_box.handle_event(event)? {
            InputEvent::Submit(prompt) => Some(Action::Submit(prompt)),
            InputEvent::ContentChanged => None,
        },
    }
}

/// Carry out an effect. Returns true when the app should exit.
fn apply_effect(effect: Effect, app: &App, tui: &mut TuiState, tx: &mpsc::Sender<Action>) -> bool {
    match effect {
        Effect::None => {}
        Effect::SpawnRequest {
            page_id,
            tool,
            messages,
        } => spawn_request(app.backend.clone(), page_id, tool, messages, tx.clone()),
        Effect::Refresh { clear_input } => {
            if clear_input {
                tui.input_box.clear();
            }
            spawn_usage_refresh(app, tx.clone());
        }
        Effect::ResetInput => tui.reset_page(app.page.placeholder),
        Effect::FetchUpgradeLink => spawn_upgrade_link(app, tx.clone()),
        Effect::Quit => return true,
    }
    false
}

fn spawn_request(
    backend: Arc<dyn GenerationBackend>,
    page_id: uuid::Uuid,
    tool: Tool,
    messages: Vec<Message>,
    tx: mpsc::Sender<Action>,
) {
    info!(
        "Spawning {:?} request with {} message(s)",
        tool,
        messages.len()
    );
    tokio::spawn(async move {
        let request_start = Instant::now();
        let action = match backend.generate(tool, &messages).await {
            Ok(reply) => {
                debug!(
                    "Reply received in {}ms ({} bytes)",
                    request_start.elapsed().as_millis(),
                    reply.content.len()
                );
                Action::ReplyReceived { page_id, reply }
            }
            Err(error) => Action::RequestFailed { page_id, error },
        };
        if tx.send(action).is_err() {
            warn!("Failed to send request result: receiver dropped");
        }
    });
}

fn spawn_usage_refresh(app: &App, tx: mpsc::Sender<Action>) {
    let backend = app.backend.clone();
    tokio::spawn(async move {
        match backend.usage().await {
            Ok(usage) => {
                if tx.send(Action::UsageRefreshed(usage)).is_err() {
                    warn!("Failed to send usage: receiver dropped");
                }
            }
            // Keep showing the last known value
            Err(e) => warn!("Usage refresh failed: {e}"),
        }
    });
}

fn spawn_upgrade_link(app: &App, tx: mpsc::Sender<Action>) {
    let backend = app.backend.clone();
    tokio::spawn(async move {
        let action = match backend.upgrade_link().await {
            Ok(link) => Action::UpgradeLinkReady(link.url),
            Err(e) => Action::UpgradeLinkFailed(e),
        };
        if tx.send(action).is_err() {
            warn!("Failed to send upgrade link: receiver dropped");
        }
    });
}
