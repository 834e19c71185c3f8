//! FAQ assistant for the Remote-Works marketplace.
//!
//! [`matcher`] maps free text onto a static [`knowledge`] base; [`chatbot`]
//! wraps it in a chat session with suggested actions and escalation.

pub mod chatbot;
pub mod config;
pub mod intent;
pub mod knowledge;
pub mod matcher;
pub mod phrases;

pub use knowledge::{Category, FaqEntry, KnowledgeBase, KnowledgeError};
pub use matcher::{Matcher, Reply, ReplyKind, Resolution};
