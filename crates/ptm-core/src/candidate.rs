//! Machine-translation hypotheses and the source-side chunk structure.

use tracing::debug;

use crate::alignment::AlignmentIndex;

/// One machine-translated hypothesis for a segment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Candidate {
    pub tokens: Vec<String>,
    pub alignment: AlignmentIndex,
    /// Model score from the translation service, when it sends one.
    pub score: Option<f64>,
}

impl Candidate {
    /// Build from target tokens and raw `"i-j"` alignment strings.
    pub fn new<S: AsRef<str>>(tokens: Vec<String>, alignment: &[S]) -> Self {
        Self {
            tokens,
            alignment: AlignmentIndex::build(alignment),
            score: None,
        }
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    pub fn token(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens joined by single spaces.
    pub fn text(&self) -> String {
        self.tokens.join(" ")
    }
}

/// Ranked candidates for one segment; index 0 is the best hypothesis.
///
/// A list is replaced wholesale when a new response arrives. Operations that
/// narrow it return a new list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateList {
    candidates: Vec<Candidate>,
}

impl CandidateList {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self { candidates }
    }

    pub fn best(&self) -> Option<&Candidate> {
        self.candidates.first()
    }

    pub fn get(&self, index: usize) -> Option<&Candidate> {
        self.candidates.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.candidates.iter()
    }

    pub fn as_slice(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Keep the candidates still consistent with `editing_prefix`.
    ///
    /// Consistency ignores spacing: a candidate survives when its tokens,
    /// concatenated without separators, start with the editing prefix with
    /// its spaces removed. If nothing survives, the best candidate is kept so
    /// the UI always has something to show while a request is in flight.
    pub fn recycle(&self, editing_prefix: &str) -> CandidateList {
        let prefix_key: String = editing_prefix.chars().filter(|&c| c != ' ').collect();
        let mut kept: Vec<Candidate> = self
            .candidates
            .iter()
            .filter(|c| c.tokens.concat().starts_with(&prefix_key))
            .cloned()
            .collect();
        if kept.is_empty() {
            if let Some(best) = self.best() {
                kept.push(best.clone());
            }
        }
        debug!(
            before = self.candidates.len(),
            after = kept.len(),
            editing_prefix,
            "recycled candidates"
        );
        CandidateList::new(kept)
    }
}

impl FromIterator<Candidate> for CandidateList {
    fn from_iter<T: IntoIterator<Item = Candidate>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a CandidateList {
    type Item = &'a Candidate;
    type IntoIter = std::slice::Iter<'a, Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.iter()
    }
}

/// Chunk id of every source token, fixed when the segment is loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkVector(Vec<usize>);

impl ChunkVector {
    pub fn new(chunks: Vec<usize>) -> Self {
        Self(chunks)
    }

    /// Every token in its own chunk.
    pub fn singletons(source_len: usize) -> Self {
        Self((0..source_len).collect())
    }

    /// Chunk id of `source`, or `None` when the index is out of range.
    pub fn chunk_of(&self, source: usize) -> Option<usize> {
        self.0.get(source).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}

impl From<Vec<usize>> for ChunkVector {
    fn from(chunks: Vec<usize>) -> Self {
        Self(chunks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cand(text: &str) -> Candidate {
        let tokens: Vec<String> = text.split(' ').map(String::from).collect();
        let align: Vec<String> = (0..tokens.len()).map(|i| format!("{i}-{i}")).collect();
        Candidate::new(tokens, &align)
    }

    #[test]
    fn candidate_accessors() {
        let c = cand("le chat").with_score(-1.5);
        assert_eq!(c.len(), 2);
        assert_eq!(c.token(1), Some("chat"));
        assert_eq!(c.token(2), None);
        assert_eq!(c.text(), "le chat");
        assert_eq!(c.score, Some(-1.5));
        assert_eq!(c.alignment.sources_of(1), &[1]);
    }

    #[test]
    fn recycle_keeps_consistent_candidates_in_order() {
        let list: CandidateList = ["le chat noir", "un chat", "le chien", "le chat gris"]
            .into_iter()
            .map(cand)
            .collect();
        let kept = list.recycle("le chat");
        let texts: Vec<String> = kept.iter().map(Candidate::text).collect();
        assert_eq!(texts, vec!["le chat noir", "le chat gris"]);
    }

    #[test]
    fn recycle_ignores_spacing() {
        let list: CandidateList = ["aujourd' hui il"].into_iter().map(cand).collect();
        assert_eq!(list.recycle("aujourd'hui").len(), 1);
    }

    #[test]
    fn recycle_falls_back_to_best() {
        let list: CandidateList = ["le chat", "un chat"].into_iter().map(cand).collect();
        let kept = list.recycle("the");
        assert_eq!(kept.len(), 1);
        assert_eq!(kept.best().map(Candidate::text).as_deref(), Some("le chat"));
    }

    #[test]
    fn recycle_empty_list() {
        assert!(CandidateList::default().recycle("le").is_empty());
    }

    #[test]
    fn chunk_lookup() {
        let chunks = ChunkVector::new(vec![0, 0, 1, 1]);
        assert_eq!(chunks.chunk_of(2), Some(1));
        assert_eq!(chunks.chunk_of(4), None);
        assert_eq!(ChunkVector::singletons(3).as_slice(), &[0, 1, 2]);
    }
}
