//! Chat assistant: turns user input into assistant messages.
//!
//! The matcher decides *what* to answer. This layer owns the session,
//! frames out-of-scope questions as an escalation menu, and interprets
//! the suggested actions attached to assistant messages.

use tracing::{debug, info};

use super::message::{Action, ChatMessage, SuggestedAction};
use super::session::Conversation;
use crate::matcher::{Matcher, ReplyKind};
use crate::phrases::{self, PhraseSelector, RandomSelector};

/// Contact details and links the assistant refers users to.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    pub support_email: String,
    pub faq_url: String,
    pub site_url: String,
    /// Used to personalize the welcome message.
    pub user_name: Option<String>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            support_email: "support@remote-works.io".to_string(),
            faq_url: "https://remote-works.io/faq".to_string(),
            site_url: "https://remote-works.io".to_string(),
            user_name: None,
        }
    }
}

/// Pages offered as shortcuts after the site map.
const SITE_PAGES: &[(&str, &str)] = &[
    ("Candidates", "/candidates"),
    ("Agents", "/agents"),
    ("FAQ", "/faq"),
    ("Contact", "/contact"),
];

/// How many sibling questions a fallback answer suggests.
const MAX_RELATED: usize = 3;

pub struct Assistant<S = RandomSelector> {
    matcher: Matcher<S>,
    config: AssistantConfig,
    conversation: Conversation,
}

impl<S: PhraseSelector> Assistant<S> {
    /// Start a session. The first message is a welcome with one quick topic
    /// per knowledge-base category.
    pub fn open(matcher: Matcher<S>, config: AssistantConfig) -> Self {
        let mut conversation = Conversation::new();

        let welcome = match &config.user_name {
            Some(name) => format!("Hi {name}! I'm the Remote-Works assistant. How can I help you today?"),
            None => "Hi! I'm the Remote-Works assistant. How can I help you today?".to_string(),
        };
        let topics = matcher
            .knowledge_base()
            .categories()
            .iter()
            .filter_map(|c| c.entries.first())
            .map(|e| SuggestedAction::ask(e.question.clone()))
            .collect();
        conversation.push_assistant(welcome, topics);

        info!("Chat session opened");
        Self {
            matcher,
            config,
            conversation,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        self.conversation.messages()
    }

    /// Suggestions on the most recent assistant message.
    pub fn current_suggestions(&self) -> &[SuggestedAction] {
        self.conversation
            .last_from_assistant()
            .map(|m| m.suggested_actions.as_slice())
            .unwrap_or_default()
    }

    /// Handle typed input. Blank input is ignored; otherwise the user message
    /// and one assistant reply are appended and the reply is returned.
    pub fn respond(&mut self, input: &str) -> Option<&ChatMessage> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        self.conversation.push_user(input);

        let Some(reply) = self.matcher.reply(input) else {
            info!("No FAQ match, offering escalation");
            return Some(self.conversation.push_assistant(phrases::OUT_OF_SCOPE, escalation_actions()));
        };

        let suggestions = match reply.kind {
            ReplyKind::Navigation => SITE_PAGES
                .iter()
                .map(|(label, path)| SuggestedAction::new(*label, Action::OpenPage(path.to_string())))
                .collect(),
            ReplyKind::Fallback => self.related_questions(reply.category.as_deref(), reply.question.as_deref()),
            ReplyKind::Greeting | ReplyKind::Social | ReplyKind::Answer => Vec::new(),
        };
        debug!(kind = ?reply.kind, category = ?reply.category, "Replying");
        Some(self.conversation.push_assistant(reply.text, suggestions))
    }

    /// Carry out a suggested action.
    pub fn perform(&mut self, action: &Action) -> Option<&ChatMessage> {
        debug!(?action, "Performing action");
        let text = match action {
            Action::Ask(question) => return self.respond(question),
            Action::ContactSupport => format!(
                "You can reach our support team at {}. We reply within one business day.",
                self.config.support_email
            ),
            Action::ViewFaq => format!("The full FAQ is available at {}.", self.config.faq_url),
            Action::LeaveMessage => format!(
                "Leave us a message through the contact form at {}/contact or email {} and we'll get back to you.",
                self.config.site_url.trim_end_matches('/'),
                self.config.support_email
            ),
            Action::OpenPage(path) => format!(
                "You can find that page at {}{}.",
                self.config.site_url.trim_end_matches('/'),
                path
            ),
        };
        Some(self.conversation.push_assistant(text, Vec::new()))
    }

    /// Whether `number` (1-based) names a suggestion currently on screen.
    pub fn has_suggestion(&self, number: usize) -> bool {
        (1..=self.current_suggestions().len()).contains(&number)
    }

    /// Pick the `number`th (1-based) suggestion currently on screen.
    pub fn choose(&mut self, number: usize) -> Option<&ChatMessage> {
        let action = self
            .conversation
            .last_from_assistant()
            .and_then(|m| m.suggestion(number))
            .map(|s| s.action.clone())?;
        self.perform(&action)
    }

    /// End the session, discarding its messages. Returns how many there were.
    pub fn close(self) -> usize {
        let count = self.conversation.len();
        info!(messages = count, "Chat session closed");
        count
    }

    fn related_questions(&self, category: Option<&str>, answered: Option<&str>) -> Vec<SuggestedAction> {
        let Some(category) = category.and_then(|name| self.matcher.knowledge_base().category(name)) else {
            return Vec::new();
        };
        category
            .entries
            .iter()
            .filter(|e| Some(e.question.as_str()) != answered)
            .take(MAX_RELATED)
            .map(|e| SuggestedAction::ask(e.question.clone()))
            .collect()
    }
}

fn escalation_actions() -> Vec<SuggestedAction> {
    vec![
        SuggestedAction::new("Contact support", Action::ContactSupport),
        SuggestedAction::new("View FAQ", Action::ViewFaq),
        SuggestedAction::new("Leave a message", Action::LeaveMessage),
    ]
}
