use std::collections::BTreeSet;

use ptm_core::word_query::WordQuery;

/// Ask the caller to fetch translations for `prefix`.
/// At most one is issued per (segment, prefix).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub segment_id: String,
    pub prefix: String,
}

/// Ask the caller to fetch word-level alternatives for one source token.
/// At most one is issued per query key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordQueryRequest {
    pub segment_id: String,
    pub query: WordQuery,
}

/// The user's text split for rendering over the best translation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overlay {
    pub prefix: String,
    pub sep: String,
    pub editing: String,
}

/// Everything the UI needs to redraw one segment, returned from each event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionResponse {
    /// Suggestions for the floating box, best first.
    pub suggestions: Vec<String>,
    /// First matching suggestion, reported even when the box is disabled.
    pub first_suggestion: Option<String>,
    /// Remainder of the best candidate after the user's text.
    pub best_translation: Vec<String>,
    /// Source tokens to mark as already translated.
    pub matched_source_tokens: BTreeSet<usize>,
    pub overlay: Overlay,
    /// Prediction-cache completions of the partially typed word.
    pub word_completions: Vec<String>,
    pub translation_request: Option<TranslationRequest>,
}
