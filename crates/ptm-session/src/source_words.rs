use ptm_core::word_query::{WordAlternatives, WordQuery};
use tracing::debug;

use super::cache::CacheEntry;
use super::types::WordQueryRequest;
use super::SegmentSession;

/// Source token under the pointer and what is known about it so far.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct HoveredToken {
    pub(crate) index: usize,
    pub(crate) query: WordQuery,
    pub(crate) alternatives: WordAlternatives,
}

impl SegmentSession {
    /// Pointer moved onto source token `index`.
    ///
    /// Cached alternatives are shown at once. Otherwise returns the request
    /// to issue, unless one is already in flight for the same query. Hovering
    /// the token that is already hovered does nothing.
    pub fn hover_source_token(&mut self, index: usize) -> Option<WordQueryRequest> {
        if self.hovered.as_ref().is_some_and(|h| h.index == index) {
            return None;
        }
        let Some(query) = WordQuery::for_token(&self.source_tokens, index) else {
            self.hovered = None;
            return None;
        };

        let (alternatives, request) = match self.word_queries.get(&query) {
            Some(CacheEntry::Ready(alternatives)) => {
                debug!(segment = %self.segment_id, key = %query.cache_key(), "word-query cache hit");
                (alternatives.clone(), None)
            }
            Some(CacheEntry::Pending) => (WordAlternatives::default(), None),
            None if !query.is_searchable() => {
                self.word_queries.insert_ready(&query, WordAlternatives::default());
                (WordAlternatives::default(), None)
            }
            None => {
                self.word_queries.mark_pending(&query);
                debug!(
                    segment = %self.segment_id,
                    key = %query.cache_key(),
                    cached = self.word_queries.len(),
                    "requesting word query"
                );
                let request = WordQueryRequest {
                    segment_id: self.segment_id.clone(),
                    query: query.clone(),
                };
                (WordAlternatives::default(), Some(request))
            }
        };

        self.hovered = Some(HoveredToken {
            index,
            query,
            alternatives,
        });
        request
    }

    /// Pointer left the source text.
    pub fn clear_source_hover(&mut self) {
        self.hovered = None;
    }

    /// Receive alternatives for `query`.
    ///
    /// They are always cached. Returns `None` if the pointer has moved to a
    /// token with a different query since the request was issued.
    pub fn receive_word_query(
        &mut self,
        query: &WordQuery,
        alternatives: WordAlternatives,
    ) -> Option<WordAlternatives> {
        self.word_queries.insert_ready(query, alternatives.clone());
        match self.hovered.as_mut() {
            Some(hovered) if hovered.query == *query => {
                hovered.alternatives = alternatives.clone();
                Some(alternatives)
            }
            _ => {
                debug!(
                    segment = %self.segment_id,
                    key = %query.cache_key(),
                    "stale word query cached"
                );
                None
            }
        }
    }

    pub fn hovered_source_token(&self) -> Option<usize> {
        self.hovered.as_ref().map(|h| h.index)
    }

    /// Alternatives for the hovered token; empty while its query is pending.
    pub fn source_alternatives(&self) -> Option<&WordAlternatives> {
        self.hovered.as_ref().map(|h| &h.alternatives)
    }
}
