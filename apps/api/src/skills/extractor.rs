//! Skill extraction — maps free résumé text onto the skill vocabulary.
//!
//! Four passes each contribute candidate strings:
//! 1. noun phrases containing a vocabulary entry
//! 2. named entities (label-filtered) containing a vocabulary entry
//! 3. vocabulary entries found in the joined content tokens
//! 4. 2- and 3-token windows equal to a vocabulary entry
//!
//! Every candidate is then replaced by the longest vocabulary entry it
//! contains, and the distinct results are sorted.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::debug;

use crate::nlp::LanguageModel;
use crate::skills::vocabulary::Vocabulary;

pub struct SkillExtractor {
    vocabulary: Vocabulary,
    model: Arc<dyn LanguageModel>,
    entity_labels: Vec<String>,
}

impl SkillExtractor {
    pub fn new(
        vocabulary: Vocabulary,
        model: Arc<dyn LanguageModel>,
        entity_labels: Vec<String>,
    ) -> Self {
        Self {
            vocabulary,
            model,
            entity_labels,
        }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Returns the sorted, de-duplicated vocabulary entries recognized in `text`.
    pub fn extract_skills(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }
        let candidates = self.collect_candidates(text);
        self.resolve_candidates(candidates.iter().map(String::as_str))
    }

    pub(crate) fn collect_candidates(&self, text: &str) -> BTreeSet<String> {
        let mut candidates = BTreeSet::new();

        for phrase in self.model.noun_phrases(text) {
            let phrase = phrase.text.to_lowercase();
            if self.vocabulary.matches_any(&phrase) {
                candidates.insert(phrase);
            }
        }
        let from_phrases = candidates.len();

        for entity in self.model.named_entities(text) {
            if !self.accepts_label(&entity.label) {
                continue;
            }
            let entity = entity.text.to_lowercase();
            if self.vocabulary.matches_any(&entity) {
                candidates.insert(entity);
            }
        }
        let from_entities = candidates.len() - from_phrases;

        let tokens: Vec<String> = self
            .model
            .tokenize(text)
            .into_iter()
            .filter(|t| t.is_content())
            .map(|t| t.text.to_lowercase())
            .collect();

        let joined = tokens.join(" ");
        for entry in self.vocabulary.entries() {
            if joined.contains(entry.as_str()) {
                candidates.insert(entry.clone());
            }
        }
        candidates.extend(self.ngram_candidates(&tokens));

        debug!(
            from_phrases,
            from_entities,
            content_tokens = tokens.len(),
            total = candidates.len(),
            "Collected skill candidates"
        );
        candidates
    }

    /// Contiguous 2- and 3-token windows that are exactly a vocabulary entry.
    fn ngram_candidates(&self, tokens: &[String]) -> Vec<String> {
        [2, 3]
            .into_iter()
            .flat_map(|n| tokens.windows(n))
            .map(|window| window.join(" "))
            .filter(|gram| self.vocabulary.contains(gram))
            .collect()
    }

    /// Maps each candidate to its canonical vocabulary entry, dropping
    /// candidates that contain none. Output is sorted and unique.
    pub fn resolve_candidates<'a, I>(&self, candidates: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        candidates
            .into_iter()
            .filter_map(|candidate| self.vocabulary.canonical_match(candidate))
            .collect::<BTreeSet<&str>>()
            .into_iter()
            .map(String::from)
            .collect()
    }

    fn accepts_label(&self, label: &str) -> bool {
        self.entity_labels
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(label))
    }
}
