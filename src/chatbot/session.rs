//! Append-only message list for one open chat widget.

use chrono::Utc;

use super::message::{ChatMessage, SuggestedAction};

/// Messages of a single session. Nothing is persisted; dropping the
/// conversation discards it.
#[derive(Debug, Default)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Last assistant message, whose suggestions are the ones on screen.
    pub fn last_from_assistant(&self) -> Option<&ChatMessage> {
        self.messages.iter().rev().find(|m| m.from_assistant)
    }

    pub fn push_user(&mut self, text: impl Into<String>) -> &ChatMessage {
        self.push(text.into(), false, Vec::new())
    }

    pub fn push_assistant(&mut self, text: impl Into<String>, suggested_actions: Vec<SuggestedAction>) -> &ChatMessage {
        self.push(text.into(), true, suggested_actions)
    }

    fn push(&mut self, text: String, from_assistant: bool, suggested_actions: Vec<SuggestedAction>) -> &ChatMessage {
        let created_at = Utc::now();
        let mut id = created_at.timestamp_millis();
        // Two messages in the same millisecond still need distinct ids.
        if let Some(last) = self.messages.last() {
            if id <= last.id {
                id = last.id + 1;
            }
        }
        self.messages.push(ChatMessage {
            id,
            text,
            from_assistant,
            created_at,
            suggested_actions,
        });
        &self.messages[self.messages.len() - 1]
    }
}
