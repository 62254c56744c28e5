use ptm_core::candidate::{CandidateList, ChunkVector};
use ptm_core::continuation::resolve_candidate;
use ptm_session::SegmentSession;
use serde::Serialize;
use tracing::debug;

use super::{load_candidates, parse_chunks, CliError};

/// What a segment would show for one state of the user's text.
#[derive(Debug, Serialize)]
pub struct SuggestReport {
    pub prefix: String,
    pub editing_text: String,
    pub suggestions: Vec<String>,
    pub first_suggestion: Option<String>,
    /// Precomputed continuations at the prefix boundary.
    pub primary: Vec<String>,
    /// Precomputed continuations further into the best candidate.
    pub expanded: Vec<String>,
    pub best_translation: Vec<String>,
    pub matched_source_tokens: Vec<usize>,
}

/// Replay `text` through a session whose translations for the text's
/// editing prefix are `candidates`.
pub fn suggest_report(
    candidates: CandidateList,
    chunks: ChunkVector,
    text: &str,
    caret: Option<usize>,
) -> SuggestReport {
    let caret = caret.unwrap_or_else(|| text.chars().count());
    let mut session = SegmentSession::new("ptmtool", chunks);
    session.initial_request();
    session.update_user_text(text, caret);
    let prefix = session.editing_prefix().to_string();
    debug!(prefix, candidates = candidates.len(), "replaying translations");
    let resp = session
        .receive_translations(&prefix, candidates)
        .unwrap_or_else(|| session.update_caret(caret));

    SuggestReport {
        prefix,
        editing_text: session.editing_text(),
        suggestions: resp.suggestions,
        first_suggestion: resp.first_suggestion,
        primary: session.ranked().suggestions.clone(),
        expanded: session.ranked().expanded.clone(),
        best_translation: resp.best_translation,
        matched_source_tokens: resp.matched_source_tokens.into_iter().collect(),
    }
}

/// Continuation of one candidate at target index `index`.
pub fn resolve_report(
    candidates: &CandidateList,
    chunks: &ChunkVector,
    index: usize,
    candidate: usize,
) -> Result<Option<String>, CliError> {
    let c = candidates.get(candidate).ok_or(CliError::NoCandidate {
        index: candidate,
        len: candidates.len(),
    })?;
    Ok(resolve_candidate(c, chunks, index))
}

pub fn suggest_cmd(response_file: &str, chunks: &str, text: &str, caret: Option<usize>, json: bool) {
    let candidates = die!(load_candidates(response_file), "Error: {}");
    let chunks = die!(parse_chunks(chunks), "Error: {}");
    let report = suggest_report(candidates, chunks, text, caret);

    if json {
        let out = die!(serde_json::to_string_pretty(&report), "Error: {}");
        println!("{out}");
        return;
    }

    println!("prefix:       {:?}", report.prefix);
    println!("editing text: {:?}", report.editing_text);
    println!("suggestions:");
    for (i, s) in report.suggestions.iter().enumerate() {
        println!("  #{:>2}: {s}", i + 1);
    }
    println!("primary ({}):", report.primary.len());
    for s in &report.primary {
        println!("  {s}");
    }
    println!("expanded ({}):", report.expanded.len());
    for s in &report.expanded {
        println!("  {s}");
    }
    println!("best translation: {}", report.best_translation.join(" "));
    println!("matched source tokens: {:?}", report.matched_source_tokens);
}

pub fn resolve_cmd(response_file: &str, chunks: &str, index: usize, candidate: usize) {
    let candidates = die!(load_candidates(response_file), "Error: {}");
    let chunks = die!(parse_chunks(chunks), "Error: {}");
    match die!(resolve_report(&candidates, &chunks, index, candidate), "Error: {}") {
        Some(text) => println!("{text}"),
        None => println!("(no continuation)"),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const RESPONSE: &str = r#"{"result": [
        {"tgt": ["le", "chat", "s'est", "assis"], "align": ["0-0", "1-1", "2-2", "3-3"]},
        {"tgt": ["un", "chat", "s'est", "assis"], "align": ["0-0", "1-1", "2-2", "3-3"]}
    ]}"#;

    fn response_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(RESPONSE.as_bytes()).unwrap();
        file
    }

    fn load() -> CandidateList {
        let file = response_file();
        load_candidates(file.path().to_str().unwrap()).unwrap()
    }

    #[test]
    fn report_at_start() {
        let report = suggest_report(load(), ChunkVector::new(vec![0, 0, 1, 1]), "", None);
        assert_eq!(report.prefix, "");
        assert_eq!(report.suggestions, vec!["le chat", "un chat"]);
        assert_eq!(report.expanded, vec!["chat", "s'est assis", "assis"]);
    }

    #[test]
    fn report_after_first_word() {
        let report = suggest_report(load(), ChunkVector::new(vec![0, 0, 1, 1]), "le ", None);
        assert_eq!(report.prefix, "le");
        assert_eq!(report.editing_text, "");
        assert_eq!(report.suggestions, vec!["chat"]);
        assert_eq!(report.matched_source_tokens, vec![0]);
        assert_eq!(report.best_translation, vec!["chat", "s'est", "assis"]);
    }

    #[test]
    fn report_serializes() {
        let report = suggest_report(load(), ChunkVector::new(vec![0, 0, 1, 1]), "le", None);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["suggestions"][0], "le chat");
        assert_eq!(json["first_suggestion"], "le chat");
    }

    #[test]
    fn resolve_single_candidate() {
        let list = load();
        let chunks = ChunkVector::new(vec![0, 0, 1, 1]);
        assert_eq!(
            resolve_report(&list, &chunks, 2, 1).unwrap().as_deref(),
            Some("s'est assis")
        );
        assert!(matches!(
            resolve_report(&list, &chunks, 0, 5),
            Err(CliError::NoCandidate { index: 5, len: 2 })
        ));
    }
}
