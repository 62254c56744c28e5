use std::collections::HashMap;

use ptm_core::candidate::CandidateList;
use ptm_core::word_query::{WordAlternatives, WordQuery};

/// Cache slot for one request key.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CacheEntry<T> {
    /// Request sent, no response yet.
    Pending,
    Ready(T),
}

/// Per-prefix translation cache for one segment. Entries are never evicted.
#[derive(Debug, Default)]
pub(crate) struct TranslationCache {
    entries: HashMap<String, CacheEntry<CandidateList>>,
}

impl TranslationCache {
    pub(crate) fn get(&self, prefix: &str) -> Option<&CacheEntry<CandidateList>> {
        self.entries.get(prefix)
    }

    pub(crate) fn mark_pending(&mut self, prefix: &str) {
        self.entries.insert(prefix.to_string(), CacheEntry::Pending);
    }

    pub(crate) fn insert_ready(&mut self, prefix: &str, candidates: CandidateList) {
        self.entries
            .insert(prefix.to_string(), CacheEntry::Ready(candidates));
    }

    pub(crate) fn is_pending(&self, prefix: &str) -> bool {
        matches!(self.entries.get(prefix), Some(CacheEntry::Pending))
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Word-query cache keyed by `"<left_context>:<source>"`.
#[derive(Debug, Default)]
pub(crate) struct WordQueryCache {
    entries: HashMap<String, CacheEntry<WordAlternatives>>,
}

impl WordQueryCache {
    pub(crate) fn get(&self, query: &WordQuery) -> Option<&CacheEntry<WordAlternatives>> {
        self.entries.get(&query.cache_key())
    }

    pub(crate) fn mark_pending(&mut self, query: &WordQuery) {
        self.entries.insert(query.cache_key(), CacheEntry::Pending);
    }

    pub(crate) fn insert_ready(&mut self, query: &WordQuery, alternatives: WordAlternatives) {
        self.entries
            .insert(query.cache_key(), CacheEntry::Ready(alternatives));
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
