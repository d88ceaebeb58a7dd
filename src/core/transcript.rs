//! # Transcript
//!
//! The ordered exchange for one page. Storage order is chronological; the UI
//! presents it newest first via [`Transcript::newest_first`].

use crate::api::Message;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The outgoing request body: everything so far plus the new user message.
    /// Does not modify the transcript.
    pub fn with_pending(&self, user: &Message) -> Vec<Message> {
        let mut out = Vec::with_capacity(self.messages.len() + 1);
        out.extend_from_slice(&self.messages);
        out.push(user.clone());
        out
    }

    /// Records one completed exchange, user message first.
    pub fn push_exchange(&mut self, user: Message, reply: Message) {
        self.messages.push(user);
        self.messages.push(reply);
    }

    pub fn newest_first(&self) -> std::iter::Rev<std::slice::Iter<'_, Message>> {
        self.messages.iter().rev()
    }
}
