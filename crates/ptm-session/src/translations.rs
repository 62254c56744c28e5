use ptm_core::candidate::CandidateList;
use tracing::debug;

use super::cache::CacheEntry;
use super::types::{SessionResponse, TranslationRequest};
use super::SegmentSession;

impl SegmentSession {
    /// Request translations for the empty prefix when the segment opens.
    /// Returns `None` if they were already requested or received.
    pub fn initial_request(&mut self) -> Option<TranslationRequest> {
        if self.cache.get("").is_some() {
            return None;
        }
        self.load_translations("")
    }

    pub fn is_request_pending(&self, prefix: &str) -> bool {
        self.cache.is_pending(prefix)
    }

    /// Receive translations for `prefix`.
    ///
    /// The list is always cached. Returns `None` if the editing prefix has
    /// moved on since the request was issued.
    pub fn receive_translations(
        &mut self,
        prefix: &str,
        candidates: CandidateList,
    ) -> Option<SessionResponse> {
        self.cache.insert_ready(prefix, candidates.clone());
        if self.prefix.editing_prefix() != prefix {
            debug!(
                segment = %self.segment_id,
                prefix,
                editing_prefix = self.prefix.editing_prefix(),
                "stale translations cached"
            );
            return None;
        }
        self.set_candidates(prefix, candidates);
        Some(self.build_response(None))
    }

    /// Serve `prefix` from the cache, or mark it pending and return the
    /// request to issue.
    pub(crate) fn load_translations(&mut self, prefix: &str) -> Option<TranslationRequest> {
        match self.cache.get(prefix) {
            Some(CacheEntry::Ready(candidates)) => {
                let candidates = candidates.clone();
                debug!(segment = %self.segment_id, prefix, "translation cache hit");
                self.set_candidates(prefix, candidates);
                None
            }
            Some(CacheEntry::Pending) => None,
            None => {
                self.cache.mark_pending(prefix);
                debug!(
                    segment = %self.segment_id,
                    prefix,
                    cached = self.cache.len(),
                    "requesting translations"
                );
                let recycled = self.candidates.recycle(prefix);
                self.set_candidates(prefix, recycled);
                Some(TranslationRequest {
                    segment_id: self.segment_id.clone(),
                    prefix: prefix.to_string(),
                })
            }
        }
    }

    /// Install a candidate list generated for `prefix` and re-rank.
    fn set_candidates(&mut self, prefix: &str, candidates: CandidateList) {
        self.prefix.set_prefix(prefix);
        self.candidates = candidates;
        self.ranked = self.ranker.rank(
            &self.candidates,
            &self.chunks,
            self.prefix.base_target_token_index(),
        );
        self.refresh_user_tokens();
    }
}
