//! Rank continuation suggestions over a candidate list and compute the
//! source tokens already covered by the user's translation.

use std::collections::{BTreeSet, HashSet};

use tracing::{debug, debug_span};

use crate::candidate::{CandidateList, ChunkVector};
use crate::continuation::resolve_candidate;
use crate::settings::settings;

/// Tunables for `SuggestionRanker`. Defaults come from the global settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankerConfig {
    pub max_precomputed: usize,
    pub max_visible: usize,
    /// Candidates scanned by the look-ahead pass, from the best down.
    pub expanded_candidates: usize,
    pub cover_unaligned: bool,
}

impl RankerConfig {
    pub fn from_settings() -> Self {
        let s = settings();
        Self {
            max_precomputed: s.suggestions.max_precomputed,
            max_visible: s.suggestions.max_visible,
            expanded_candidates: s.suggestions.expanded_candidates,
            cover_unaligned: s.matching.cover_unaligned,
        }
    }
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self::from_settings()
    }
}

/// Precomputed suggestions for one (candidate list, prefix) pair.
///
/// Both lists are unique, and no string appears in both. Rank is position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankedSuggestions {
    /// Continuations starting exactly at the prefix boundary.
    pub suggestions: Vec<String>,
    /// Continuations starting further into the best candidate(s).
    pub expanded: Vec<String>,
}

impl RankedSuggestions {
    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty() && self.expanded.is_empty()
    }
}

/// Insertion-ordered set of strings; first insert fixes the rank.
struct RankedSet {
    items: Vec<String>,
    seen: HashSet<String>,
}

impl RankedSet {
    fn new() -> Self {
        Self {
            items: Vec::new(),
            seen: HashSet::new(),
        }
    }

    fn insert(&mut self, s: String) {
        if self.seen.insert(s.clone()) {
            self.items.push(s);
        }
    }

    fn contains(&self, s: &str) -> bool {
        self.seen.contains(s)
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

pub struct SuggestionRanker {
    config: RankerConfig,
}

impl Default for SuggestionRanker {
    fn default() -> Self {
        Self::new(RankerConfig::default())
    }
}

impl SuggestionRanker {
    pub fn new(config: RankerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RankerConfig {
        &self.config
    }

    /// Compute ranked suggestions for a prefix of `prefix_token_count` tokens.
    pub fn rank(
        &self,
        candidates: &CandidateList,
        chunks: &ChunkVector,
        prefix_token_count: usize,
    ) -> RankedSuggestions {
        let base = prefix_token_count;
        let _span = debug_span!("rank", candidates = candidates.len(), base).entered();

        let mut primary = RankedSet::new();
        for candidate in candidates {
            if primary.len() == self.config.max_precomputed {
                break;
            }
            if let Some(text) = resolve_candidate(candidate, chunks, base) {
                primary.insert(text);
            }
        }

        // Always offer at least the next word of the best hypothesis.
        if primary.is_empty() {
            if let Some(token) = candidates.best().and_then(|c| c.token(base)) {
                debug!(token, "no aligned continuation, using best next token");
                primary.insert(token.to_string());
            }
        }

        let mut expanded = RankedSet::new();
        'scan: for candidate in candidates.iter().take(self.config.expanded_candidates) {
            for future in base..candidate.len() {
                if expanded.len() == self.config.max_precomputed {
                    break 'scan;
                }
                let Some(text) = resolve_candidate(candidate, chunks, future) else {
                    continue;
                };
                if !primary.contains(&text) {
                    expanded.insert(text);
                }
            }
        }

        debug!(
            primary = primary.len(),
            expanded = expanded.len(),
            "ranked suggestions"
        );
        RankedSuggestions {
            suggestions: primary.items,
            expanded: expanded.items,
        }
    }

    /// Suggestions to show for `editing_text`, the characters typed since the
    /// prefix boundary: primary matches first, then look-ahead matches.
    pub fn filter_for_display(&self, ranked: &RankedSuggestions, editing_text: &str) -> Vec<String> {
        let mut out = Vec::new();
        self.filter_into(&ranked.suggestions, editing_text, &mut out);
        self.filter_into(&ranked.expanded, editing_text, &mut out);
        out
    }

    /// Like `filter_for_display` but without look-ahead suggestions.
    pub fn filter_primary(&self, ranked: &RankedSuggestions, editing_text: &str) -> Vec<String> {
        let mut out = Vec::new();
        self.filter_into(&ranked.suggestions, editing_text, &mut out);
        out
    }

    fn filter_into(&self, list: &[String], editing_text: &str, out: &mut Vec<String>) {
        for suggestion in list {
            if out.len() >= self.config.max_visible {
                return;
            }
            // Skip exact matches; they would complete nothing.
            if suggestion.starts_with(editing_text) && suggestion.len() > editing_text.len() {
                out.push(suggestion.clone());
            }
        }
    }

    /// Source tokens covered by what the user has typed, per the best
    /// candidate's alignment.
    ///
    /// `user_tokens` is the whitespace split of the user's text; a trailing
    /// empty token means the cursor sits after a separator and does not count.
    pub fn matched_source_tokens(
        &self,
        candidates: &CandidateList,
        user_tokens: &[String],
    ) -> BTreeSet<usize> {
        let mut matched = BTreeSet::new();
        let Some(best) = candidates.best() else {
            return matched;
        };
        let Some(last) = user_tokens.last() else {
            return matched;
        };
        let max_index = if last.is_empty() {
            user_tokens.len() - 1
        } else {
            user_tokens.len()
        };

        let mut right_most: Option<usize> = None;
        for target in 0..max_index {
            for &source in best.alignment.sources_of(target) {
                matched.insert(source);
                right_most = right_most.max(Some(source));
            }
        }

        // Unaligned function words inside the covered span count as covered.
        if self.config.cover_unaligned {
            if let Some(right_most) = right_most {
                for source in 0..right_most {
                    if !best.alignment.is_source_aligned(source) {
                        matched.insert(source);
                    }
                }
            }
        }
        matched
    }
}
