use ptm_core::trie::PrefixTrie;
use tracing::debug;

use super::SegmentSession;

impl SegmentSession {
    /// Replace the prediction cache with `phrases`, best first, and return
    /// the completions of the word being typed.
    pub fn receive_predictions<I, S>(&mut self, phrases: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.predictions = PrefixTrie::from_phrases(phrases);
        debug!(
            segment = %self.segment_id,
            keys = self.predictions.len(),
            "prediction cache replaced"
        );
        self.word_completions()
    }

    /// Cached completions of the partially typed final word.
    ///
    /// Empty right after a separator or while the word is shorter than the
    /// configured minimum.
    pub fn word_completions(&self) -> Vec<String> {
        if !self.user_tokens.is_mid_word() {
            return Vec::new();
        }
        let word = self.user_tokens.last();
        if word.chars().count() < self.min_word_prefix {
            return Vec::new();
        }
        self.predictions.completions(word)
    }

    pub fn clear_predictions(&mut self) {
        self.predictions.clear();
    }

    pub fn has_predictions(&self) -> bool {
        !self.predictions.is_empty()
    }
}
