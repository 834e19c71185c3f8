//! Canned assistant text and the filler-phrase selector.

use rand::Rng;

pub const GREETING: &str = "Hi there! I'm the Remote-Works assistant. I can answer questions about \
getting started, working with agents as a candidate, becoming an agent, payments, safety and your \
account. What would you like to know?";

pub const SITE_MAP: &str = "Here's how to find your way around Remote-Works:\n\
- Home: an overview of how the marketplace works\n\
- Candidates: post a request and browse agents\n\
- Agents: become an agent and manage your offers\n\
- FAQ: answers to the most common questions\n\
- Contact: reach our support team";

pub const SOCIAL_LINKS: &str = "You can follow Remote-Works here:\n\
- Twitter: @remoteworks\n\
- Blog: news and approval tips on our blog\n\
- Trustpilot: read reviews from candidates and agents";

pub const MORE_SPECIFIC: &str = "\n\nWould you like to know something more specific?";

pub const OUT_OF_SCOPE: &str = "I'm not sure I can answer that one. You can contact our support \
team, browse the full FAQ, or leave us a message and we'll get back to you.";

/// Generic lead-ins for categories without a bespoke prefix.
pub const FILLERS: [&str; 8] = [
    "Let me look that up for you. ",
    "Good question! ",
    "Here's what I found: ",
    "I can help with that. ",
    "Sure thing! ",
    "Happy to explain. ",
    "Here's the answer: ",
    "Thanks for asking! ",
];

/// Picks an index in `0..len` for a phrase list. `len` is never zero.
pub trait PhraseSelector {
    fn choose(&self, len: usize) -> usize;
}

/// Uniformly random choice from the thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSelector;

impl PhraseSelector for RandomSelector {
    fn choose(&self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

impl<F> PhraseSelector for F
where
    F: Fn(usize) -> usize,
{
    fn choose(&self, len: usize) -> usize {
        self(len)
    }
}

/// Out-of-range picks wrap rather than panic.
pub fn filler<S: PhraseSelector + ?Sized>(selector: &S) -> &'static str {
    FILLERS[selector.choose(FILLERS.len()) % FILLERS.len()]
}
