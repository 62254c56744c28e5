//! Word-level alternatives for a single source token.
//!
//! A query is the source token plus the token to its left. Results whose
//! first target token carries no word character are dropped, and a source
//! token without one never yields alternatives.

use serde::{Deserialize, Serialize};

use crate::response::TranslationResult;

/// Lookup of one source token in context.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordQuery {
    pub source: String,
    /// Source token to the left; empty for the first token.
    pub left_context: String,
}

impl WordQuery {
    pub fn new(source: impl Into<String>, left_context: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            left_context: left_context.into(),
        }
    }

    /// Query for source token `index`, or `None` past the end.
    pub fn for_token<S: AsRef<str>>(tokens: &[S], index: usize) -> Option<Self> {
        let source = tokens.get(index)?.as_ref();
        let left_context = match index.checked_sub(1) {
            Some(left) if !source.is_empty() => tokens[left].as_ref(),
            _ => "",
        };
        Some(Self::new(source, left_context))
    }

    /// `"<left_context>:<source>"`
    pub fn cache_key(&self) -> String {
        format!("{}:{}", self.left_context, self.source)
    }

    /// Whether the service needs asking at all.
    pub fn is_searchable(&self) -> bool {
        has_word_char(&self.source)
    }
}

/// Ranked target phrases for one query, with the service's scores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordAlternatives {
    pub targets: Vec<String>,
    pub scores: Vec<Option<f64>>,
}

impl WordAlternatives {
    /// Keep the results worth showing for `source`.
    ///
    /// A source without word characters replaces the results with itself,
    /// which the first-token check then removes.
    pub fn filtered(source: &str, results: Vec<TranslationResult>) -> Self {
        let results = if has_word_char(source) {
            results
        } else {
            vec![TranslationResult {
                tgt: vec![source.to_string()],
                align: Vec::new(),
                score: None,
            }]
        };

        let mut alternatives = Self::default();
        for result in results {
            match result.tgt.first() {
                Some(first) if has_word_char(first) => {}
                _ => continue,
            }
            alternatives.targets.push(result.tgt.join(" "));
            alternatives.scores.push(result.score);
        }
        alternatives
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Letter, digit or underscore anywhere in `s`.
pub fn has_word_char(s: &str) -> bool {
    s.chars().any(|c| c.is_alphanumeric() || c == '_')
}
