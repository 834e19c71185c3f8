//! Conversation messages and the actions an assistant message can offer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What happens when the user picks a suggested action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "value")]
pub enum Action {
    /// Ask this question as if the user had typed it.
    Ask(String),
    ContactSupport,
    ViewFaq,
    LeaveMessage,
    /// Point the user at a page of the site, relative to the site URL.
    OpenPage(String),
}

/// A button-like choice attached to an assistant message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedAction {
    pub label: String,
    pub action: Action,
}

impl SuggestedAction {
    pub fn new(label: impl Into<String>, action: Action) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }

    /// A suggestion that asks `question` when picked.
    pub fn ask(question: impl Into<String>) -> Self {
        let question = question.into();
        Self {
            label: question.clone(),
            action: Action::Ask(question),
        }
    }
}

/// A chat message with all metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Creation time in milliseconds, bumped to stay unique within a session.
    pub id: i64,
    pub text: String,
    pub from_assistant: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggested_actions: Vec<SuggestedAction>,
}

impl ChatMessage {
    /// Format message for a terminal transcript.
    ///
    /// Example output:
    /// ```text
    /// [10:31] Assistant: Good question! ...
    ///   1) Contact support
    ///   2) View FAQ
    /// ```
    pub fn format(&self) -> String {
        let speaker = if self.from_assistant { "Assistant" } else { "You" };
        let mut out = format!("[{}] {}: {}", self.created_at.format("%H:%M"), speaker, self.text);
        for (i, suggestion) in self.suggested_actions.iter().enumerate() {
            out.push_str(&format!("\n  {}) {}", i + 1, suggestion.label));
        }
        out
    }

    /// Suggested action by its 1-based number as shown by [`format`](Self::format).
    pub fn suggestion(&self, number: usize) -> Option<&SuggestedAction> {
        number.checked_sub(1).and_then(|i| self.suggested_actions.get(i))
    }
}
