//! # Application State
//!
//! Core business state for Muse. Domain data only; presentation state such as
//! scroll offsets and the input buffer lives in the `tui` module.
//!
//! ```text
//! App
//! ├── backend: Arc<dyn GenerationBackend>  // generation service
//! ├── page: Page                  // the open tool page
//! │   ├── id: Uuid                // identity of this page instance
//! │   ├── tool: Tool              // conversation or code
//! │   ├── transcript: Transcript  // completed exchanges
//! │   ├── placeholder: &str       // example prompt
//! │   └── pending: Option<Message>// user message awaiting a reply
//! ├── usage: Option<Usage>        // last known free-tier usage
//! ├── toast: Option<Toast>        // transient notification
//! ├── upgrade_open: bool          // upsell modal visible
//! ├── upgrade_pending: bool       // checkout link requested
//! └── status_message: String      // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::api::{GenerationBackend, Message, Usage};
use crate::core::config::ResolvedConfig;
use crate::core::tool::Tool;
use crate::core::transcript::Transcript;

/// Text of the generic failure notification.
pub const GENERIC_ERROR: &str = "Something went wrong...";

/// One opened tool page. Leaving the page drops it, transcript included.
#[derive(Debug, Clone)]
pub struct Page {
    pub id: Uuid,
    pub tool: Tool,
    pub transcript: Transcript,
    pub placeholder: &'static str,
    /// The submitted user message while its request is in flight.
    pub pending: Option<Message>,
}

impl Page {
    pub fn open(tool: Tool) -> Self {
        Self {
            id: Uuid::new_v4(),
            tool,
            transcript: Transcript::new(),
            placeholder: tool.random_placeholder(),
            pending: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Empty-state placeholder is shown only when idle with nothing to show.
    pub fn shows_empty_state(&self) -> bool {
        self.transcript.is_empty() && !self.is_loading()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub message: String,
    pub shown_at: Instant,
}

impl Toast {
    pub fn error(message: impl Into<String>, now: Instant) -> Self {
        Self {
            message: message.into(),
            shown_at: now,
        }
    }

    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.shown_at) >= ttl
    }
}

pub struct App {
    pub backend: Arc<dyn GenerationBackend>,
    pub page: Page,
    pub usage: Option<Usage>,
    pub toast: Option<Toast>,
    pub toast_duration: Duration,
    pub upgrade_open: bool,
    pub upgrade_pending: bool,
    pub status_message: String,
}

impl App {
    pub fn new(backend: Arc<dyn GenerationBackend>, tool: Tool) -> Self {
        Self {
            backend,
            page: Page::open(tool),
            usage: None,
            toast: None,
            toast_duration: Duration::from_secs(crate::core::config::DEFAULT_TOAST_SECS),
            upgrade_open: false,
            upgrade_pending: false,
            status_message: String::new(),
        }
    }

    pub fn from_config(backend: Arc<dyn GenerationBackend>, config: &ResolvedConfig) -> Self {
        let mut app = Self::new(backend, config.tool);
        app.toast_duration = Duration::from_secs(config.toast_secs);
        app
    }

    pub fn is_loading(&self) -> bool {
        self.page.is_loading()
    }
}
