use std::collections::BTreeSet;

use ptm_core::prefix::best_translation_overlay;

use super::types::{Overlay, SessionResponse, TranslationRequest};
use super::SegmentSession;

impl SegmentSession {
    pub(crate) fn build_response(&self, translation_request: Option<TranslationRequest>) -> SessionResponse {
        let best_translation = best_translation_overlay(&self.candidates, &self.user_tokens.tokens);

        let mut suggestions = self.visible_suggestions(!best_translation.is_empty());
        let first_suggestion = suggestions.first().cloned();
        if !self.suggestions_enabled {
            suggestions.clear();
        }

        let matched_source_tokens = if self.best_translation_enabled {
            self.ranker
                .matched_source_tokens(&self.candidates, &self.user_tokens.tokens)
        } else {
            BTreeSet::new()
        };

        SessionResponse {
            suggestions,
            first_suggestion,
            best_translation,
            matched_source_tokens,
            overlay: Overlay {
                prefix: self.user_tokens.overlay_prefix.clone(),
                sep: self.user_tokens.overlay_sep.clone(),
                editing: self.user_tokens.overlay_editing.clone(),
            },
            word_completions: self.word_completions(),
            translation_request,
        }
    }

    /// Characters typed after the prefix, leading whitespace removed.
    pub fn editing_text(&self) -> String {
        let prefix_chars = self.prefix.prefix().chars().count();
        let rest: String = self.user_text.chars().skip(prefix_chars).collect();
        rest.trim_start().to_string()
    }

    /// Suggestions are shown only while the caret is in the first word past
    /// the prefix and the best candidate still has tokens left.
    fn visible_suggestions(&self, has_best_translation: bool) -> Vec<String> {
        let prefix = self.prefix.prefix();
        let past_prefix = self.caret > prefix.chars().count() || prefix.is_empty();
        if !past_prefix || !has_best_translation {
            return Vec::new();
        }
        let editing_text = self.editing_text();
        if editing_text.is_empty() {
            self.ranker.filter_primary(&self.ranked, &editing_text)
        } else {
            self.ranker.filter_for_display(&self.ranked, &editing_text)
        }
    }
}
