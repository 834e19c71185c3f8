//! Fixed-response intents checked before any scoring happens.

/// Queries starting with one of these get the introduction.
pub const GREETINGS: &[&str] = &[
    "hi",
    "hello",
    "hey",
    "greetings",
    "good morning",
    "good afternoon",
    "good evening",
];

pub const NAVIGATION_TRIGGERS: &[&str] = &["navigate", "go to", "find page"];

pub const SOCIAL_TRIGGERS: &[&str] = &["social", "twitter", "blog", "trustpilot", "follow"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    Navigation,
    Social,
    /// Nothing fixed applies; the query goes to scoring.
    Question,
}

/// Classify an already-lowercased query. First match wins, in the order
/// greeting, navigation, social. Raw substrings are tested, so short
/// tokens like "hi" count here even though scoring ignores them.
pub fn detect(query: &str) -> Intent {
    if GREETINGS.iter().any(|g| query.starts_with(g)) {
        return Intent::Greeting;
    }

    if NAVIGATION_TRIGGERS.iter().any(|t| query.contains(t)) {
        return Intent::Navigation;
    }

    if SOCIAL_TRIGGERS.iter().any(|t| query.contains(t)) {
        return Intent::Social;
    }

    Intent::Question
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_prefix() {
        assert_eq!(detect("hello there"), Intent::Greeting);
        assert_eq!(detect("good evening, how do payments work?"), Intent::Greeting);
        assert_eq!(detect("hey"), Intent::Greeting);
    }

    #[test]
    fn test_greeting_only_as_prefix() {
        // Somewhere in the middle is not a greeting.
        assert_eq!(detect("well hello"), Intent::Question);
        assert_eq!(detect("say good morning"), Intent::Question);
    }

    #[test]
    fn test_greeting_prefix_is_raw() {
        assert_eq!(detect("history of the site"), Intent::Greeting);
    }

    #[test]
    fn test_navigation() {
        assert_eq!(detect("where do i go to sign up"), Intent::Navigation);
        assert_eq!(detect("help me navigate"), Intent::Navigation);
        assert_eq!(detect("can't find page"), Intent::Navigation);
    }

    #[test]
    fn test_social() {
        assert_eq!(detect("are you on twitter"), Intent::Social);
        assert_eq!(detect("reviews on trustpilot?"), Intent::Social);
        assert_eq!(detect("do you have a blog"), Intent::Social);
    }

    #[test]
    fn test_priority_order() {
        assert_eq!(detect("hi, go to your blog"), Intent::Greeting);
        assert_eq!(detect("go to your blog"), Intent::Navigation);
    }

    #[test]
    fn test_question() {
        assert_eq!(detect("how much does it cost"), Intent::Question);
        assert_eq!(detect(""), Intent::Question);
    }
}
