//! Chatbot module - FAQ chat sessions on top of the matcher.

pub mod engine;
pub mod message;
pub mod session;


pub use engine::{Assistant, AssistantConfig};
pub use message::{Action, ChatMessage, SuggestedAction};
pub use session::Conversation;
