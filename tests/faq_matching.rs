//! Matching behavior of the built-in knowledge base through the public API.
//!
//! Run with: cargo test --test faq_matching

use std::sync::Arc;

use faq_assistant::phrases::{self, FILLERS};
use faq_assistant::{KnowledgeBase, Matcher, ReplyKind, Resolution};

fn kb() -> KnowledgeBase {
    KnowledgeBase::builtin()
}

fn fixed_matcher(index: usize) -> Matcher<impl Fn(usize) -> usize> {
    Matcher::with_selector(Arc::new(kb()), move |_: usize| index)
}

fn winning_question(kb: &KnowledgeBase, query: &str) -> Option<String> {
    match faq_assistant::matcher::resolve(kb, query) {
        Resolution::Answer { entry, .. } | Resolution::Fallback { entry, .. } => Some(entry.question.clone()),
        _ => None,
    }
}

#[test]
fn test_greeting_prefix_any_case() {
    let kb = kb();
    for query in ["Hi", "HELLO there", "hey, how much does it cost?", "Good Morning!", "greetings from Lisbon"] {
        assert_eq!(faq_assistant::matcher::resolve(&kb, query), Resolution::Greeting, "{query}");
    }
    let reply = fixed_matcher(0).reply("Hello, what is Remote-Works?").unwrap();
    assert_eq!(reply.kind, ReplyKind::Greeting);
    assert_eq!(reply.text, phrases::GREETING);
}

#[test]
fn test_exact_question_wins() {
    let reply = fixed_matcher(0).reply("What is Remote-Works?").unwrap();
    assert_eq!(reply.kind, ReplyKind::Answer);
    assert_eq!(reply.category.as_deref(), Some("Getting Started"));
    assert_eq!(reply.question.as_deref(), Some("What is Remote-Works?"));
    assert!(reply.text.starts_with("Great question about getting started! Remote-Works is a marketplace"));
}

#[test]
fn test_every_builtin_question_finds_itself() {
    let kb = kb();
    for category in kb.categories() {
        for entry in &category.entries {
            match faq_assistant::matcher::resolve(&kb, &entry.question) {
                Resolution::Answer { entry: found, score, .. } => {
                    assert_eq!(found.question, entry.question);
                    assert!(score.exact);
                }
                other => panic!("{} resolved to {other:?}", entry.question),
            }
        }
    }
}

#[test]
fn test_no_keywords_is_no_match() {
    let matcher = fixed_matcher(0);
    assert_eq!(matcher.resolve("purple elephant bicycle"), Resolution::NoMatch);
    assert!(matcher.reply("purple elephant bicycle").is_none());
}

#[test]
fn test_keyword_only_falls_back_to_first_entry() {
    let reply = fixed_matcher(0).reply("trust").unwrap();
    assert_eq!(reply.kind, ReplyKind::Fallback);
    assert_eq!(reply.category.as_deref(), Some("Safety & Trust"));
    assert_eq!(reply.question.as_deref(), Some("Is Remote-Works legitimate?"));
    assert!(reply.text.starts_with(FILLERS[0]));
    assert!(reply.text.ends_with("Would you like to know something more specific?"));
}

#[test]
fn test_winner_is_deterministic_across_fillers() {
    let kb = kb();
    let expected = winning_question(&kb, "how do agents get paid");
    for _ in 0..20 {
        assert_eq!(winning_question(&kb, "how do agents get paid"), expected);
    }

    // The random filler changes only the prefix.
    let matcher = Matcher::new(Arc::new(KnowledgeBase::builtin()));
    for _ in 0..20 {
        let reply = matcher.reply("I forgot my password").unwrap();
        assert_eq!(reply.question.as_deref(), Some("How do I reset my password?"));
        assert!(FILLERS.iter().any(|f| reply.text.starts_with(f)));
        assert!(reply.text.ends_with("follow the email we send you."));
    }
}

#[test]
fn test_case_insensitive() {
    let kb = kb();
    let upper = winning_question(&kb, "WHAT IS REMOTE-WORKS?");
    let lower = winning_question(&kb, "what is remote-works?");
    assert_eq!(upper, lower);
    assert_eq!(upper.as_deref(), Some("What is Remote-Works?"));
}

#[test]
fn test_empty_query_is_no_match() {
    let matcher = fixed_matcher(0);
    assert_eq!(matcher.resolve(""), Resolution::NoMatch);
    assert!(matcher.reply("").is_none());
    assert!(matcher.reply("   ").is_none());
}

#[test]
fn test_cost_question() {
    let kb = kb();
    match faq_assistant::matcher::resolve(&kb, "how much does it cost") {
        Resolution::Answer { category, entry, score } => {
            assert_eq!(category.name, "Getting Started");
            assert_eq!(entry.question, "How much does it cost to use Remote-Works?");
            assert!(score.word_matches >= 3);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_navigation_and_social() {
    let matcher = fixed_matcher(0);
    assert_eq!(matcher.reply("how do I navigate the site").unwrap().kind, ReplyKind::Navigation);
    assert_eq!(matcher.reply("are you on Twitter?").unwrap().kind, ReplyKind::Social);
}

#[test]
fn test_matcher_shared_across_threads() {
    let matcher = Arc::new(Matcher::new(Arc::new(KnowledgeBase::builtin())));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let matcher = Arc::clone(&matcher);
            std::thread::spawn(move || matcher.reply("how much does it cost").and_then(|r| r.question))
        })
        .collect();
    for handle in handles {
        let question = handle.join().unwrap();
        assert_eq!(question.as_deref(), Some("How much does it cost to use Remote-Works?"));
    }
}
