//! FAQ answer matching.
//!
//! Resolution runs in three stages:
//! 1. fixed intents (greeting, navigation, social) on the raw lowercased query;
//! 2. scoring of every entry in categories whose keywords hit the query;
//! 3. a first-match fallback to the opening entry of the first hit category.
//!
//! Matching is case-insensitive substring and token containment only. There
//! is no I/O and no failure mode: every input resolves to something,
//! possibly [`Resolution::NoMatch`].

use std::sync::Arc;
use tracing::debug;

use crate::intent::{self, Intent};
use crate::knowledge::{Category, FaqEntry, KnowledgeBase};
use crate::phrases::{self, PhraseSelector, RandomSelector};

pub const EXACT_MATCH_BONUS: u32 = 1000;
pub const WORD_MATCH_POINTS: u32 = 10;
pub const KEYWORD_MATCH_POINTS: u32 = 5;
pub const CONTENT_MATCH_POINTS: u32 = 3;

/// Words of this many characters or fewer are ignored when scoring.
const MIN_WORD_CHARS: usize = 2;

/// Breakdown of how one entry scored against a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EntryScore {
    /// Query equals the question, or either contains the other.
    pub exact: bool,
    /// Query words overlapping some question word.
    pub word_matches: u32,
    /// Keywords of the entry's category found in the query.
    pub keyword_matches: u32,
    /// Query words found anywhere in the answer.
    pub content_matches: u32,
}

impl EntryScore {
    pub fn total(&self) -> u32 {
        let exact = if self.exact { EXACT_MATCH_BONUS } else { 0 };
        exact
            + self.word_matches * WORD_MATCH_POINTS
            + self.keyword_matches * KEYWORD_MATCH_POINTS
            + self.content_matches * CONTENT_MATCH_POINTS
    }

    /// Whether anything about the question itself matched. Category and
    /// answer points alone do not qualify an entry to win scoring.
    pub fn has_question_evidence(&self) -> bool {
        self.exact || self.word_matches > 0
    }
}

/// What a query resolved to, borrowing from the knowledge base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'kb> {
    Greeting,
    Navigation,
    Social,
    /// Highest-scoring entry with question evidence.
    Answer {
        category: &'kb Category,
        entry: &'kb FaqEntry,
        score: EntryScore,
    },
    /// A category keyword hit but no question matched.
    Fallback {
        category: &'kb Category,
        entry: &'kb FaqEntry,
    },
    NoMatch,
}

/// Splits on whitespace and keeps words longer than two characters.
/// Punctuation stays attached to its word.
pub fn significant_words(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .filter(|w| w.chars().count() > MIN_WORD_CHARS)
        .collect()
}

/// Score one entry. `query` must already be lowercased and `query_words`
/// must be `significant_words(query)`.
pub fn score_entry(entry: &FaqEntry, query: &str, query_words: &[&str], keyword_matches: usize) -> EntryScore {
    let question = entry.question.to_lowercase();
    let answer = entry.answer.to_lowercase();

    let exact = query == question || question.contains(query) || query.contains(question.as_str());

    let question_words = significant_words(&question);
    let word_matches = query_words
        .iter()
        .filter(|qw| question_words.iter().any(|w| w.contains(**qw) || qw.contains(*w)))
        .count();

    let content_matches = query_words.iter().filter(|qw| answer.contains(**qw)).count();

    EntryScore {
        exact,
        word_matches: word_matches as u32,
        keyword_matches: keyword_matches as u32,
        content_matches: content_matches as u32,
    }
}

/// Resolve a query against the knowledge base. Deterministic.
pub fn resolve<'kb>(kb: &'kb KnowledgeBase, query: &str) -> Resolution<'kb> {
    let query = query.to_lowercase();

    match intent::detect(&query) {
        Intent::Greeting => return Resolution::Greeting,
        Intent::Navigation => return Resolution::Navigation,
        Intent::Social => return Resolution::Social,
        Intent::Question => {}
    }

    let query_words = significant_words(&query);
    let mut best: Option<(&Category, &FaqEntry, EntryScore)> = None;

    for category in kb.categories() {
        let keyword_matches = category.keyword_matches(&query);
        if keyword_matches == 0 {
            continue;
        }
        for entry in &category.entries {
            let score = score_entry(entry, &query, &query_words, keyword_matches);
            if !score.has_question_evidence() {
                continue;
            }
            // Strictly greater: ties keep the earlier entry.
            let better = match &best {
                Some((_, _, current)) => score.total() > current.total(),
                None => true,
            };
            if better {
                best = Some((category, entry, score));
            }
        }
    }

    if let Some((category, entry, score)) = best {
        return Resolution::Answer { category, entry, score };
    }

    kb.categories()
        .iter()
        .find(|c| c.keyword_matches(&query) > 0)
        .and_then(|category| category.entries.first().map(|entry| Resolution::Fallback { category, entry }))
        .unwrap_or(Resolution::NoMatch)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    Greeting,
    Navigation,
    Social,
    Answer,
    Fallback,
}

/// A framed answer ready to show to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub kind: ReplyKind,
    /// Originating category for answers and fallbacks.
    pub category: Option<String>,
    /// Matched question for answers and fallbacks.
    pub question: Option<String>,
    pub text: String,
}

/// Matches queries against a shared knowledge base and frames the result.
pub struct Matcher<S = RandomSelector> {
    kb: Arc<KnowledgeBase>,
    selector: S,
}

impl Matcher<RandomSelector> {
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        Self::with_selector(kb, RandomSelector)
    }
}

impl<S: PhraseSelector> Matcher<S> {
    /// Use `selector` to pick filler phrases, e.g. a fixed index in tests.
    pub fn with_selector(kb: Arc<KnowledgeBase>, selector: S) -> Self {
        Self { kb, selector }
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.kb
    }

    pub fn resolve(&self, query: &str) -> Resolution<'_> {
        resolve(&self.kb, query)
    }

    /// Best framed answer for `query`, or `None` when nothing matched and
    /// the caller should offer escalation instead.
    pub fn reply(&self, query: &str) -> Option<Reply> {
        let resolution = self.resolve(query);
        let reply = match resolution {
            Resolution::Greeting => fixed(ReplyKind::Greeting, phrases::GREETING),
            Resolution::Navigation => fixed(ReplyKind::Navigation, phrases::SITE_MAP),
            Resolution::Social => fixed(ReplyKind::Social, phrases::SOCIAL_LINKS),
            Resolution::Answer { category, entry, score } => {
                debug!(category = %category.name, score = score.total(), "faq answer matched");
                let prefix = match &category.prefix {
                    Some(prefix) => prefix.as_str(),
                    None => phrases::filler(&self.selector),
                };
                Reply {
                    kind: ReplyKind::Answer,
                    category: Some(category.name.clone()),
                    question: Some(entry.question.clone()),
                    text: format!("{}{}", prefix, entry.answer),
                }
            }
            Resolution::Fallback { category, entry } => {
                debug!(category = %category.name, "faq fallback to first entry");
                Reply {
                    kind: ReplyKind::Fallback,
                    category: Some(category.name.clone()),
                    question: Some(entry.question.clone()),
                    text: format!(
                        "{}{}{}",
                        phrases::filler(&self.selector),
                        entry.answer,
                        phrases::MORE_SPECIFIC
                    ),
                }
            }
            Resolution::NoMatch => {
                debug!("faq no match");
                return None;
            }
        };
        Some(reply)
    }
}

fn fixed(kind: ReplyKind, text: &str) -> Reply {
    Reply {
        kind,
        category: None,
        question: None,
        text: text.to_string(),
    }
}
