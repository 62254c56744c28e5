//! Decoding of translation, prediction and word-query service payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::alignment::AlignmentPair;
use crate::candidate::{Candidate, CandidateList};
use crate::trie::PrefixTrie;
use crate::word_query::WordAlternatives;

#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("response has no `{0}` array")]
    MissingField(&'static str),
}

/// One entry of a translation response's `result` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub tgt: Vec<String>,
    #[serde(default)]
    pub align: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl From<TranslationResult> for Candidate {
    fn from(result: TranslationResult) -> Self {
        let candidate = Candidate::new(result.tgt, &result.align);
        match result.score {
            Some(score) => candidate.with_score(score),
            None => candidate,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TranslationResponse {
    #[serde(default)]
    result: Vec<TranslationResult>,
}

/// Decode `{"result": [{"tgt": [..], "align": ["i-j", ..]}, ..]}`.
///
/// A response without `result` decodes to an empty list.
pub fn parse_translation_response(json: &str) -> Result<CandidateList, ResponseError> {
    let response: TranslationResponse = serde_json::from_str(json)?;
    debug!(candidates = response.result.len(), "decoded translation response");
    Ok(response.result.into_iter().map(Candidate::from).collect())
}

/// Decode a word-query response for `source`; same shape as a translation
/// response, filtered to the alternatives worth showing.
pub fn parse_word_query_response(json: &str, source: &str) -> Result<WordAlternatives, ResponseError> {
    let response: TranslationResponse = serde_json::from_str(json)?;
    let received = response.result.len();
    let alternatives = WordAlternatives::filtered(source, response.result);
    debug!(source, received, kept = alternatives.len(), "decoded word-query response");
    Ok(alternatives)
}

/// One entry of a prediction response's `predictions` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(rename = "tgtPhrase")]
    pub tgt_phrase: String,
    /// Source span as `"first-last"`, inclusive.
    #[serde(rename = "srcCoverage", default)]
    pub src_coverage: String,
    /// Part of the source span already covered by the typed prefix.
    #[serde(rename = "srcPrefCoverage", default, skip_serializing_if = "Option::is_none")]
    pub src_pref_coverage: Option<String>,
}

impl Prediction {
    /// Source token indices this phrase translates.
    pub fn source_coverage(&self) -> Vec<usize> {
        span_indices(&self.src_coverage)
    }

    /// Source token indices the typed prefix already covers; empty if absent.
    pub fn source_prefix_coverage(&self) -> Vec<usize> {
        self.src_pref_coverage.as_deref().map(span_indices).unwrap_or_default()
    }
}

fn span_indices(span: &str) -> Vec<usize> {
    match span.parse::<AlignmentPair>() {
        Ok(span) if span.source <= span.target => (span.source..=span.target).collect(),
        _ => Vec::new(),
    }
}

/// Decode `{"predictions": [{"tgtPhrase": "..", "srcCoverage": "i-j"}, ..]}`.
pub fn parse_prediction_response(json: &str) -> Result<Vec<Prediction>, ResponseError> {
    let mut value: Value = serde_json::from_str(json)?;
    let predictions = value
        .get_mut("predictions")
        .map(Value::take)
        .ok_or(ResponseError::MissingField("predictions"))?;
    let predictions: Vec<Prediction> = serde_json::from_value(predictions)?;
    debug!(predictions = predictions.len(), "decoded prediction response");
    Ok(predictions)
}

/// Trie over the predicted phrases, ranked by response order.
pub fn prediction_trie(predictions: &[Prediction]) -> PrefixTrie {
    PrefixTrie::from_phrases(predictions.iter().map(|p| p.tgt_phrase.as_str()))
}
