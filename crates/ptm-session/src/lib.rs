//! Stateful per-segment session driving interactive suggestions.
//!
//! `SegmentSession` owns the editing state of one segment. Each editor event
//! returns a `SessionResponse` for the UI. Translations are fetched by the
//! caller: the session asks for them through `TranslationRequest` and takes
//! them back through `receive_translations`. Word-level alternatives for a
//! hovered source token follow the same pattern through `WordQueryRequest`
//! and `receive_word_query`.

mod cache;
mod completion;
mod display;
mod source_words;
mod translations;
pub(crate) mod types;

#[cfg(test)]
mod tests;

use ptm_core::candidate::{CandidateList, ChunkVector};
use ptm_core::prefix::{PrefixState, UserTokens};
use ptm_core::ranker::{RankedSuggestions, RankerConfig, SuggestionRanker};
use ptm_core::settings::settings;
use ptm_core::trie::PrefixTrie;
use tracing::debug_span;

pub use types::{Overlay, SessionResponse, TranslationRequest, WordQueryRequest};

use cache::{TranslationCache, WordQueryCache};
use source_words::HoveredToken;

pub struct SegmentSession {
    segment_id: String,
    /// Fixed for the lifetime of the segment.
    chunks: ChunkVector,
    ranker: SuggestionRanker,

    prefix: PrefixState,
    candidates: CandidateList,
    ranked: RankedSuggestions,
    cache: TranslationCache,

    user_text: String,
    /// Caret position in characters.
    caret: usize,
    user_tokens: UserTokens,

    predictions: PrefixTrie,
    min_word_prefix: usize,

    source_tokens: Vec<String>,
    word_queries: WordQueryCache,
    hovered: Option<HoveredToken>,

    suggestions_enabled: bool,
    best_translation_enabled: bool,
}

impl SegmentSession {
    pub fn new(segment_id: impl Into<String>, chunks: ChunkVector) -> Self {
        Self::with_ranker(segment_id, chunks, RankerConfig::from_settings())
    }

    pub fn with_ranker(segment_id: impl Into<String>, chunks: ChunkVector, config: RankerConfig) -> Self {
        Self {
            segment_id: segment_id.into(),
            chunks,
            ranker: SuggestionRanker::new(config),
            prefix: PrefixState::new(),
            candidates: CandidateList::default(),
            ranked: RankedSuggestions::default(),
            cache: TranslationCache::default(),
            user_text: String::new(),
            caret: 0,
            user_tokens: UserTokens::parse("", 0),
            predictions: PrefixTrie::new(),
            min_word_prefix: settings().completion.min_word_prefix,
            source_tokens: Vec::new(),
            word_queries: WordQueryCache::default(),
            hovered: None,
            suggestions_enabled: true,
            best_translation_enabled: true,
        }
    }

    /// Source tokens used for word-level lookups.
    pub fn with_source_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.source_tokens = tokens.into_iter().map(Into::into).collect();
        self
    }

    pub fn segment_id(&self) -> &str {
        &self.segment_id
    }

    pub fn set_suggestions_enabled(&mut self, enabled: bool) {
        self.suggestions_enabled = enabled;
    }

    pub fn set_best_translation_enabled(&mut self, enabled: bool) {
        self.best_translation_enabled = enabled;
    }

    pub fn set_min_word_prefix(&mut self, min: usize) {
        self.min_word_prefix = min;
    }

    /// Target text the current candidate list was generated for.
    pub fn prefix(&self) -> &str {
        self.prefix.prefix()
    }

    pub fn editing_prefix(&self) -> &str {
        self.prefix.editing_prefix()
    }

    pub fn user_text(&self) -> &str {
        &self.user_text
    }

    pub fn candidates(&self) -> &CandidateList {
        &self.candidates
    }

    pub fn ranked(&self) -> &RankedSuggestions {
        &self.ranked
    }

    /// Text changed in the editor.
    ///
    /// Re-tokenizes the text and, when the editing prefix moved, serves the
    /// new prefix from the cache or asks the caller for translations.
    pub fn update_user_text(&mut self, text: &str, caret: usize) -> SessionResponse {
        let _span = debug_span!("update_user_text", segment = %self.segment_id, caret).entered();

        if text.ends_with(' ') {
            self.predictions.clear();
        }
        text.clone_into(&mut self.user_text);
        self.caret = caret;
        self.refresh_user_tokens();

        let mut request = None;
        if self.prefix.set_editing_prefix(&self.user_tokens.editing_prefix) {
            let editing_prefix = self.prefix.editing_prefix().to_string();
            request = self.load_translations(&editing_prefix);
        }
        self.build_response(request)
    }

    /// Caret moved without a text change.
    pub fn update_caret(&mut self, caret: usize) -> SessionResponse {
        self.caret = caret;
        self.build_response(None)
    }

    /// Replace the word being typed with `text` followed by a space.
    pub fn accept_suggestion(&mut self, text: &str) -> SessionResponse {
        let mut new_text = String::new();
        let editing_prefix = self.prefix.editing_prefix();
        if !editing_prefix.is_empty() {
            new_text.push_str(editing_prefix);
            new_text.push(' ');
        }
        if !text.is_empty() {
            new_text.push_str(text);
            new_text.push(' ');
        }
        let caret = new_text.chars().count();
        self.update_user_text(&new_text, caret)
    }

    /// Re-split the user's text against the current prefix length.
    fn refresh_user_tokens(&mut self) {
        let prefix_length = self.prefix.base_target_token_index();
        self.user_tokens = UserTokens::parse(&self.user_text, prefix_length);
    }
}
