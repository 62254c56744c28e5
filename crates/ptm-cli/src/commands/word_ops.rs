use ptm_core::candidate::ChunkVector;
use ptm_core::response::parse_word_query_response;
use ptm_core::word_query::WordAlternatives;
use ptm_session::SegmentSession;
use tracing::debug;

use super::{read_file, CliError};

/// Alternatives a segment would show when hovering one source token.
#[derive(Debug, Clone, PartialEq)]
pub struct WordReport {
    pub cache_key: String,
    /// `false` when the token is answered without asking the service.
    pub requested: bool,
    pub alternatives: WordAlternatives,
}

/// Hover token `index` of `source_text` and answer its query with the
/// word-query response in `response_file`.
pub fn word_report(response_file: &str, source_text: &str, index: usize) -> Result<WordReport, CliError> {
    let tokens: Vec<&str> = source_text.split_whitespace().collect();
    let len = tokens.len();
    let mut session = SegmentSession::new("ptmtool", ChunkVector::singletons(len)).with_source_tokens(tokens);
    let Some(request) = session.hover_source_token(index) else {
        let alternatives = session
            .source_alternatives()
            .cloned()
            .ok_or(CliError::NoSourceToken { index, len })?;
        return Ok(WordReport {
            cache_key: String::new(),
            requested: false,
            alternatives,
        });
    };

    let cache_key = request.query.cache_key();
    let json = read_file(response_file)?;
    let decoded = parse_word_query_response(&json, &request.query.source)?;
    debug!(key = %cache_key, kept = decoded.len(), "replaying word query");
    let alternatives = session
        .receive_word_query(&request.query, decoded)
        .unwrap_or_default();
    Ok(WordReport {
        cache_key,
        requested: true,
        alternatives,
    })
}

pub fn words_cmd(response_file: &str, source_text: &str, index: usize) {
    let report = die!(word_report(response_file, source_text, index), "Error: {}");
    if report.requested {
        println!("query: {}", report.cache_key);
    }
    if report.alternatives.is_empty() {
        println!("(no alternatives)");
        return;
    }
    for (i, (target, score)) in report
        .alternatives
        .targets
        .iter()
        .zip(&report.alternatives.scores)
        .enumerate()
    {
        match score {
            Some(score) => println!("#{:>2}: {target}  ({score:.3})", i + 1),
            None => println!("#{:>2}: {target}", i + 1),
        }
    }
}
