mod completion;

use ptm_core::candidate::{Candidate, CandidateList, ChunkVector};
use ptm_core::ranker::RankerConfig;

use super::SegmentSession;

pub(super) const DIAGONAL: [&str; 4] = ["0-0", "1-1", "2-2", "3-3"];

pub(super) fn cand(text: &str, align: &[&str]) -> Candidate {
    Candidate::new(text.split(' ').map(String::from).collect(), align)
}

pub(super) fn make_test_candidates() -> CandidateList {
    CandidateList::new(vec![
        cand("le chat s'est assis", &DIAGONAL),
        cand("le chat était assis", &DIAGONAL),
        cand("un chat s'est assis", &DIAGONAL),
        cand("le chat s'est couché", &DIAGONAL),
    ])
}

pub(super) fn test_config() -> RankerConfig {
    RankerConfig {
        max_precomputed: 100,
        max_visible: 4,
        expanded_candidates: 1,
        cover_unaligned: true,
    }
}

/// Session over a 4-token source split into chunks [0, 0, 1, 1].
pub(super) fn make_session() -> SegmentSession {
    let mut session =
        SegmentSession::with_ranker("seg-1", ChunkVector::new(vec![0, 0, 1, 1]), test_config());
    session.set_min_word_prefix(1);
    session
}

/// Session that has received the translations for the empty prefix.
pub(super) fn make_loaded_session() -> SegmentSession {
    let mut session = make_session();
    session.initial_request();
    session.receive_translations("", make_test_candidates());
    session
}

pub(super) fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Set the text with the caret at its end.
pub(super) fn type_text(session: &mut SegmentSession, text: &str) -> crate::SessionResponse {
    session.update_user_text(text, text.chars().count())
}

/// Session over "the cat saw the dog" for word-level lookups.
pub(super) fn make_source_session() -> SegmentSession {
    make_session().with_source_tokens(["the", "cat", "saw", "the", "dog", ","])
}
