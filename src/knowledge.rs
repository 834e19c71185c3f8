//! Static FAQ knowledge base.
//!
//! Categories carry lowercase trigger keywords and an ordered list of
//! question/answer entries. The base is built once at start-up (either the
//! built-in content or a JSON file) and is read-only afterwards.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Errors that can occur when loading a knowledge base.
#[derive(Debug, thiserror::Error)]
pub enum KnowledgeError {
    /// Failed to read the knowledge base file.
    #[error("failed to read knowledge base '{}': {source}", path.display())]
    ReadFile { path: PathBuf, source: std::io::Error },
    /// Failed to write an exported knowledge base.
    #[error("failed to write knowledge base '{}': {source}", path.display())]
    WriteFile { path: PathBuf, source: std::io::Error },
    /// Failed to parse JSON.
    #[error("failed to parse knowledge base: {0}")]
    Parse(#[from] serde_json::Error),
    /// Structurally valid JSON with unusable content.
    #[error("invalid knowledge base: {0}")]
    Invalid(String),
}

/// A single question and its canned answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

/// A topic grouping entries under a shared set of trigger keywords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    /// Bespoke text placed before answers from this category.
    /// Categories without one get a generic filler phrase.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    pub keywords: Vec<String>,
    pub entries: Vec<FaqEntry>,
}

impl Category {
    /// Number of keywords found as substrings of an already-lowercased query.
    pub fn keyword_matches(&self, query: &str) -> usize {
        self.keywords.iter().filter(|k| query.contains(k.as_str())).count()
    }
}

#[derive(Deserialize)]
struct KnowledgeFile {
    categories: Vec<Category>,
}

/// Ordered, immutable set of categories consulted by the matcher.
#[derive(Debug, Clone, Serialize)]
pub struct KnowledgeBase {
    categories: Vec<Category>,
}

impl KnowledgeBase {
    /// Build a knowledge base, normalizing keywords and rejecting
    /// content the matcher cannot use.
    pub fn new(categories: Vec<Category>) -> Result<Self, KnowledgeError> {
        let kb = Self::normalized(categories);
        kb.validate()?;
        Ok(kb)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, KnowledgeError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| KnowledgeError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, KnowledgeError> {
        let file: KnowledgeFile = serde_json::from_str(content)?;
        Self::new(file.categories)
    }

    pub fn to_json(&self) -> Result<String, KnowledgeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), KnowledgeError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?).map_err(|source| KnowledgeError::WriteFile {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn entry_count(&self) -> usize {
        self.categories.iter().map(|c| c.entries.len()).sum()
    }

    /// Keywords are a set: trimmed, lowercased, first occurrence kept.
    fn normalized(mut categories: Vec<Category>) -> Self {
        for category in &mut categories {
            let mut keywords: Vec<String> = Vec::with_capacity(category.keywords.len());
            for keyword in category.keywords.drain(..) {
                let keyword = keyword.trim().to_lowercase();
                if !keywords.contains(&keyword) {
                    keywords.push(keyword);
                }
            }
            category.keywords = keywords;
        }
        Self { categories }
    }

    fn validate(&self) -> Result<(), KnowledgeError> {
        if self.categories.is_empty() {
            return Err(KnowledgeError::Invalid("at least one category is required".into()));
        }
        let mut names: Vec<String> = Vec::with_capacity(self.categories.len());
        for category in &self.categories {
            if category.name.trim().is_empty() {
                return Err(KnowledgeError::Invalid("category name must not be empty".into()));
            }
            // Replies refer back to their category by name.
            let name = category.name.trim().to_lowercase();
            if names.contains(&name) {
                return Err(KnowledgeError::Invalid(format!(
                    "duplicate category name '{}'",
                    category.name
                )));
            }
            names.push(name);
            // An empty keyword is a substring of every query.
            if category.keywords.iter().any(|k| k.is_empty()) {
                return Err(KnowledgeError::Invalid(format!(
                    "category '{}' has an empty keyword",
                    category.name
                )));
            }
            if category.keywords.is_empty() {
                return Err(KnowledgeError::Invalid(format!(
                    "category '{}' has no keywords",
                    category.name
                )));
            }
            if category.entries.is_empty() {
                return Err(KnowledgeError::Invalid(format!(
                    "category '{}' has no entries",
                    category.name
                )));
            }
            for entry in &category.entries {
                if entry.question.trim().is_empty() || entry.answer.trim().is_empty() {
                    return Err(KnowledgeError::Invalid(format!(
                        "category '{}' has an entry with an empty question or answer",
                        category.name
                    )));
                }
            }
        }
        Ok(())
    }

    /// The FAQ content shipped with the site.
    pub fn builtin() -> Self {
        Self::normalized(vec![
            category(
                "Getting Started",
                Some("Great question about getting started! "),
                &[
                    "remote-works", "remote works", "start", "begin", "sign up", "register",
                    "cost", "free", "join", "what is", "how does",
                ],
                &[
                    (
                        "What is Remote-Works?",
                        "Remote-Works is a marketplace that connects candidates looking to get approved on remote-work platforms with experienced agents who guide them through the application process.",
                    ),
                    (
                        "How do I sign up?",
                        "Click \"Get Started\" on the home page, choose whether you are joining as a candidate or as an agent, and complete the short registration form. Your account is active as soon as your email is verified.",
                    ),
                    (
                        "How much does it cost to use Remote-Works?",
                        "Creating an account is free. Agents set their own fee or revenue-share terms and you only pay once you agree to work with one.",
                    ),
                    (
                        "How does Remote-Works work?",
                        "Candidates post a request describing the platform they want to be approved on. Agents review requests, send offers, and once an offer is accepted they guide the candidate until approval.",
                    ),
                ],
            ),
            category(
                "For Candidates",
                Some("Here's what candidates should know: "),
                &["candidate", "approval", "approved", "apply", "application", "platform", "rejected"],
                &[
                    (
                        "How can an agent help me get approved?",
                        "Agents review your profile, help you prepare documents and assessments, and walk you through each step of the platform's application.",
                    ),
                    (
                        "Which platforms do agents help with?",
                        "Agents on Remote-Works support the major remote-work platforms for data annotation, transcription, search evaluation and freelance tasks. Each agent lists the platforms they cover on their profile.",
                    ),
                    (
                        "How long does approval take?",
                        "It depends on the platform. Most candidates hear back within one to three weeks after submitting a complete application.",
                    ),
                    (
                        "What happens if my application is rejected?",
                        "Your agent will review the feedback with you and advise whether to reapply. Refund terms for rejected applications are shown on each offer before you accept it.",
                    ),
                ],
            ),
            category(
                "For Agents",
                Some("Thanks for your interest in becoming an agent! "),
                &["agent", "become", "commission", "requirements"],
                &[
                    (
                        "How do I become an agent?",
                        "Register with an agent account, complete your profile with the platforms you have experience with, and pass our short verification step. Once verified you can start sending offers to candidates.",
                    ),
                    (
                        "How do agents earn money?",
                        "Agents earn either a fixed fee or a revenue share agreed with the candidate in the offer. Earnings are released after the candidate confirms approval.",
                    ),
                    (
                        "What are the requirements for agents?",
                        "You need a verified identity and proven experience with at least one supported platform. Agents with strong ratings get featured in search results.",
                    ),
                ],
            ),
            category(
                "Payments & Fees",
                Some("Here's how payments work: "),
                &["pay", "fee", "refund", "revenue", "money", "charge", "invoice"],
                &[
                    (
                        "How do payments work?",
                        "Payments are held by Remote-Works until the agreed milestone is reached, then released to the agent.",
                    ),
                    (
                        "Can I get a refund?",
                        "If an agent does not deliver what the offer describes you can request a refund from your dashboard. Our team reviews every request within five business days.",
                    ),
                    (
                        "What is a revenue share?",
                        "Instead of a fixed fee, some agents take a percentage of what the candidate earns on the platform for an agreed number of months.",
                    ),
                ],
            ),
            category(
                "Safety & Trust",
                None,
                &["trust", "safe", "scam", "secure", "legit", "verif", "privacy", "data", "protect"],
                &[
                    (
                        "Is Remote-Works legitimate?",
                        "Yes. Remote-Works is a registered business, every agent is identity-checked, and payments are only released once the agreed work is done.",
                    ),
                    (
                        "How are agents verified?",
                        "Agents submit a government ID and evidence of their platform experience, which our team checks before their profile goes live.",
                    ),
                    (
                        "How is my personal data protected?",
                        "Your documents are stored encrypted and are only shared with the agent you hire. You can delete them from your dashboard at any time.",
                    ),
                ],
            ),
            category(
                "Account & Support",
                None,
                &["account", "password", "login", "log in", "support", "contact", "delete"],
                &[
                    (
                        "How do I reset my password?",
                        "Use the \"Forgot password\" link on the login page and follow the email we send you.",
                    ),
                    (
                        "How do I contact support?",
                        "Use the contact form on our Contact page or email the support team. We reply within one business day.",
                    ),
                    (
                        "How do I delete my account?",
                        "Open Settings, choose \"Delete account\" and confirm. Any open offers are cancelled first.",
                    ),
                ],
            ),
        ])
    }
}

fn category(name: &str, prefix: Option<&str>, keywords: &[&str], entries: &[(&str, &str)]) -> Category {
    Category {
        name: name.to_string(),
        prefix: prefix.map(str::to_string),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        entries: entries
            .iter()
            .map(|(question, answer)| FaqEntry {
                question: question.to_string(),
                answer: answer.to_string(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn assert_err<T>(result: Result<T, KnowledgeError>) -> KnowledgeError {
        match result {
            Ok(_) => panic!("expected error, got Ok"),
            Err(e) => e,
        }
    }

    #[test]
    fn test_builtin_is_valid() {
        let kb = KnowledgeBase::builtin();
        kb.validate().unwrap();
        assert_eq!(kb.categories().len(), 6);
        assert_eq!(kb.categories()[0].name, "Getting Started");
        assert_eq!(kb.categories()[0].entries[0].question, "What is Remote-Works?");
    }

    #[test]
    fn test_builtin_has_four_bespoke_prefixes() {
        let kb = KnowledgeBase::builtin();
        let with_prefix = kb.categories().iter().filter(|c| c.prefix.is_some()).count();
        assert_eq!(with_prefix, 4);
    }

    #[test]
    fn test_keywords_normalized_and_deduplicated() {
        let kb = KnowledgeBase::new(vec![category(
            "Test",
            None,
            &["  Cost ", "cost", "PRICE"],
            &[("q?", "a.")],
        )])
        .unwrap();
        assert_eq!(kb.categories()[0].keywords, vec!["cost", "price"]);
    }

    #[test]
    fn test_keyword_matches_counts_each_keyword_once() {
        let cat = category("Test", None, &["cost", "price"], &[("q?", "a.")]);
        assert_eq!(cat.keyword_matches("cost cost price"), 2);
        assert_eq!(cat.keyword_matches("nothing here"), 0);
    }

    #[test]
    fn test_rejects_empty_keyword() {
        let err = assert_err(KnowledgeBase::new(vec![category("Test", None, &["   "], &[("q?", "a.")])]));
        assert!(matches!(err, KnowledgeError::Invalid(_)));
        assert!(err.to_string().contains("empty keyword"));
    }

    #[test]
    fn test_rejects_category_without_entries() {
        let err = assert_err(KnowledgeBase::new(vec![category("Test", None, &["x"], &[])]));
        assert!(err.to_string().contains("no entries"));
    }

    #[test]
    fn test_rejects_duplicate_category_names() {
        let err = assert_err(KnowledgeBase::new(vec![
            category("Help", None, &["billing"], &[("Billing one?", "B1.")]),
            category(" help ", None, &["shipping"], &[("Shipping one?", "S1.")]),
        ]));
        assert!(matches!(err, KnowledgeError::Invalid(_)));
        assert!(err.to_string().contains("duplicate category name"));
    }

    #[test]
    fn test_rejects_duplicate_category_names_from_json() {
        let err = assert_err(KnowledgeBase::from_json(
            r#"{"categories": [
                {"name": "Help", "keywords": ["billing"], "entries": [{"question": "Billing one?", "answer": "B1."}]},
                {"name": "Help", "keywords": ["shipping"], "entries": [{"question": "Shipping one?", "answer": "S1."}]}
            ]}"#,
        ));
        assert!(matches!(err, KnowledgeError::Invalid(_)));
    }

    #[test]
    fn test_rejects_no_categories() {
        let err = assert_err(KnowledgeBase::new(Vec::new()));
        assert!(matches!(err, KnowledgeError::Invalid(_)));
    }

    #[test]
    fn test_json_roundtrip_keeps_prefixes() {
        let kb = KnowledgeBase::builtin();
        let json = kb.to_json().unwrap();
        let parsed = KnowledgeBase::from_json(&json).unwrap();
        assert_eq!(parsed.categories(), kb.categories());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            br#"{"categories": [{"name": "Hours", "keywords": ["Open"], "entries": [
                {"question": "When are you open?", "answer": "Always."}
            ]}]}"#,
        )
        .unwrap();
        let kb = KnowledgeBase::load(file.path()).unwrap();
        assert_eq!(kb.entry_count(), 1);
        assert_eq!(kb.category("Hours").unwrap().keywords, vec!["open"]);
        assert!(kb.category("Hours").unwrap().prefix.is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kb.json");
        KnowledgeBase::builtin().save(&path).unwrap();
        let kb = KnowledgeBase::load(&path).unwrap();
        assert_eq!(kb.entry_count(), KnowledgeBase::builtin().entry_count());
    }

    #[test]
    fn test_load_missing_file() {
        let err = assert_err(KnowledgeBase::load("/nonexistent/kb.json"));
        assert!(matches!(err, KnowledgeError::ReadFile { .. }));
    }

    #[test]
    fn test_load_invalid_json() {
        let err = assert_err(KnowledgeBase::from_json("{ not json"));
        assert!(matches!(err, KnowledgeError::Parse(_)));
    }
}
