//! Rule-based English analysis: no model files, fully deterministic.
//!
//! Tokens are whitespace chunks with surrounding punctuation split off, so
//! technical names such as `node.js`, `ci/cd`, `c++` and `c#` stay whole.

use std::collections::HashSet;
use std::ops::Range;

use unicode_segmentation::UnicodeSegmentation;

use crate::nlp::stopwords::STOP_WORDS;
use crate::nlp::{Entity, LanguageModel, Span, Token};

/// Symbols that may end a word without being split off (`c++`, `c#`).
const WORD_SUFFIX_SYMBOLS: &[char] = &['+', '#'];
const POSSESSIVE_SUFFIXES: &[&str] = &["'s", "’s"];

pub struct RuleBasedModel {
    stop_words: HashSet<&'static str>,
}

impl Default for RuleBasedModel {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleBasedModel {
    pub fn new() -> Self {
        Self {
            stop_words: STOP_WORDS.iter().copied().collect(),
        }
    }

    fn make_token(&self, text: &str, start: usize, end: usize) -> Token {
        let raw = &text[start..end];
        let lower = raw.to_lowercase();
        Token {
            text: raw.to_string(),
            start,
            end,
            is_stop: self.stop_words.contains(lower.as_str()),
            is_punct: !raw.chars().any(char::is_alphanumeric),
        }
    }

    fn push_chunk(&self, text: &str, chunk: Range<usize>, tokens: &mut Vec<Token>) {
        let word = &text[chunk.clone()];
        if !word.chars().any(char::is_alphanumeric) {
            tokens.push(self.make_token(text, chunk.start, chunk.end));
            return;
        }

        let mut lo = chunk.start;
        for c in word.chars().take_while(|c| !c.is_alphanumeric()) {
            tokens.push(self.make_token(text, lo, lo + c.len_utf8()));
            lo += c.len_utf8();
        }

        let mut hi = chunk.end;
        let mut trailing = Vec::new();
        for c in text[lo..chunk.end].chars().rev() {
            if c.is_alphanumeric() || WORD_SUFFIX_SYMBOLS.contains(&c) {
                break;
            }
            hi -= c.len_utf8();
            trailing.push(hi..hi + c.len_utf8());
        }

        let core = &text[lo..hi];
        match POSSESSIVE_SUFFIXES
            .iter()
            .find(|suffix| core.len() > suffix.len() && core.ends_with(*suffix))
        {
            Some(suffix) => {
                let split = hi - suffix.len();
                tokens.push(self.make_token(text, lo, split));
                tokens.push(self.make_token(text, split, hi));
            }
            None => tokens.push(self.make_token(text, lo, hi)),
        }

        tokens.extend(trailing.into_iter().rev().map(|r| self.make_token(text, r.start, r.end)));
    }
}

impl LanguageModel for RuleBasedModel {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        for chunk in whitespace_chunks(text) {
            self.push_chunk(text, chunk, &mut tokens);
        }
        tokens
    }

    /// Maximal runs of content tokens. Stopwords, punctuation and line breaks
    /// end a phrase.
    fn noun_phrases(&self, text: &str) -> Vec<Span> {
        let tokens = self.tokenize(text);
        token_runs(text, &tokens, Token::is_content)
            .into_iter()
            .map(|run| {
                let (start, end) = (tokens[run.start].start, tokens[run.end - 1].end);
                Span {
                    text: text[start..end].to_string(),
                }
            })
            .collect()
    }

    /// Runs of capitalized content tokens.
    fn named_entities(&self, text: &str) -> Vec<Entity> {
        let tokens = self.tokenize(text);
        let sentence_starts = sentence_starts(text);

        token_runs(text, &tokens, |t| {
            t.is_content() && t.text.chars().any(char::is_uppercase)
        })
        .into_iter()
        .map(|run| {
            let run = &tokens[run];
            let (start, end) = (run[0].start, run[run.len() - 1].end);
            Entity {
                text: text[start..end].to_string(),
                label: entity_label(run, sentence_starts.contains(&start)).to_string(),
            }
        })
        .collect()
    }
}

/// `ORG` for acronyms and multi-word names, `MISC` for a lone title-cased
/// word opening a sentence, `PRODUCT` otherwise.
fn entity_label(run: &[Token], sentence_initial: bool) -> &'static str {
    if run.len() > 1 {
        return "ORG";
    }
    let word = run[0].text.as_str();
    let letters: Vec<char> = word.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.len() >= 2 && letters.iter().all(|c| c.is_uppercase()) {
        "ORG"
    } else if sentence_initial && is_title_case(word) {
        "MISC"
    } else {
        "PRODUCT"
    }
}

fn is_title_case(word: &str) -> bool {
    let mut chars = word.chars();
    chars.next().is_some_and(char::is_uppercase) && chars.all(char::is_lowercase)
}

fn whitespace_chunks(text: &str) -> Vec<Range<usize>> {
    let mut chunks = Vec::new();
    let mut start = None;
    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            if let Some(s) = start.take() {
                chunks.push(s..i);
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        chunks.push(s..text.len());
    }
    chunks
}

/// Index ranges of consecutive tokens satisfying `keep`, split at line breaks.
fn token_runs(text: &str, tokens: &[Token], keep: impl Fn(&Token) -> bool) -> Vec<Range<usize>> {
    let mut runs = Vec::new();
    let mut current: Option<Range<usize>> = None;

    for (i, token) in tokens.iter().enumerate() {
        if !keep(token) {
            runs.extend(current.take());
            continue;
        }
        current = match current.take() {
            Some(run) if !text[tokens[run.end - 1].end..token.start].contains('\n') => {
                Some(run.start..i + 1)
            }
            Some(run) => {
                runs.push(run);
                Some(i..i + 1)
            }
            None => Some(i..i + 1),
        };
    }
    runs.extend(current);
    runs
}

/// Byte offset of the first alphanumeric character of each sentence.
fn sentence_starts(text: &str) -> HashSet<usize> {
    text.split_sentence_bound_indices()
        .filter_map(|(offset, sentence)| {
            sentence
                .char_indices()
                .find(|(_, c)| c.is_alphanumeric())
                .map(|(i, _)| offset + i)
        })
        .collect()
}
