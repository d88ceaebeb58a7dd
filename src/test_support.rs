//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;
use async_trait::async_trait;

use crate::api::{BackendError, GenerationBackend, Message, UpgradeLink, Usage};
use crate::core::tool::Tool;

/// A backend that echoes the last message and never fails.
pub struct EchoBackend;

#[async_trait]
impl GenerationBackend for EchoBackend {
    async fn generate(&self, _tool: Tool, messages: &[Message]) -> Result<Message, BackendError> {
        let last = messages.last().map(|m| m.content.clone()).unwrap_or_default();
        Ok(Message::assistant(last))
    }

    async fn usage(&self) -> Result<Usage, BackendError> {
        Ok(Usage { count: 0, limit: 5, is_pro: false })
    }

    async fn upgrade_link(&self) -> Result<UpgradeLink, BackendError> {
        Ok(UpgradeLink {
            url: "https://checkout.example/session".to_string(),
        })
    }
}

/// Creates a test App on the conversation page with an `EchoBackend`.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(Arc::new(EchoBackend), Tool::Conversation)
}
