//! Linguistic analysis used by skill extraction.
//!
//! `SkillExtractor` only sees the `LanguageModel` trait, so the rule-based
//! default can be replaced by a statistical model without touching callers.
//! Carried in `AppState` behind `Arc<dyn LanguageModel>`.

pub mod rule_based;
pub mod stopwords;

pub use rule_based::RuleBasedModel;

/// A single token with its byte range in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub is_stop: bool,
    pub is_punct: bool,
}

impl Token {
    /// Content tokens take part in keyword and n-gram matching.
    pub fn is_content(&self) -> bool {
        !self.is_stop && !self.is_punct
    }
}

/// A contiguous slice of the source text, e.g. a noun phrase, copied verbatim
/// including inner whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
}

/// A named entity. Label names are model-specific (`ORG`, `PRODUCT`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub text: String,
    pub label: String,
}

pub trait LanguageModel: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<Token>;

    fn noun_phrases(&self, text: &str) -> Vec<Span>;

    fn named_entities(&self, text: &str) -> Vec<Entity>;
}
