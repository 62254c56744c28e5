use ptm_core::response::{parse_prediction_response, prediction_trie};

use super::{read_file, CliError};

/// A completed phrase with the source tokens it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionLine {
    pub phrase: String,
    pub coverage: Vec<usize>,
    pub prefix_coverage: Vec<usize>,
}

/// Completions of `partial` from a prediction-service response, best first.
pub fn completions(predictions_file: &str, partial: &str) -> Result<Vec<CompletionLine>, CliError> {
    let json = read_file(predictions_file)?;
    let predictions = parse_prediction_response(&json)?;
    let trie = prediction_trie(&predictions);
    let lines = trie
        .find_all_by_value(partial)
        .into_iter()
        .filter_map(|(rank, suffix)| {
            let prediction = predictions.get(rank)?;
            Some(CompletionLine {
                phrase: format!("{partial}{suffix}"),
                coverage: prediction.source_coverage(),
                prefix_coverage: prediction.source_prefix_coverage(),
            })
        })
        .collect();
    Ok(lines)
}

fn format_span(indices: &[usize]) -> String {
    match (indices.first(), indices.last()) {
        (Some(first), Some(last)) if first == last => first.to_string(),
        (Some(first), Some(last)) => format!("{first}-{last}"),
        _ => "-".to_string(),
    }
}

pub fn format_line(rank: usize, line: &CompletionLine) -> String {
    let mut out = format!("#{:>2}: {}  [src {}", rank, line.phrase, format_span(&line.coverage));
    if !line.prefix_coverage.is_empty() {
        out.push_str(&format!(", prefix {}", format_span(&line.prefix_coverage)));
    }
    out.push(']');
    out
}

pub fn complete_cmd(predictions_file: &str, partial: &str) {
    let found = die!(completions(predictions_file, partial), "Error: {}");
    if found.is_empty() {
        println!("(no completions for {partial:?})");
        return;
    }
    for (i, line) in found.iter().enumerate() {
        println!("{}", format_line(i + 1, line));
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn phrases(lines: &[CompletionLine]) -> Vec<&str> {
        lines.iter().map(|l| l.phrase.as_str()).collect()
    }

    #[test]
    fn completes_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"predictions": [
                {{"tgtPhrase": "chat", "srcCoverage": "1-1"}},
                {{"tgtPhrase": "chaton", "srcCoverage": "1-2", "srcPrefCoverage": "1-1"}},
                {{"tgtPhrase": "chien", "srcCoverage": "1-1"}}
            ]}}"#
        )
        .unwrap();
        let path = file.path().to_str().unwrap();
        let found = completions(path, "chat").unwrap();
        assert_eq!(phrases(&found), vec!["chat", "chaton"]);
        assert_eq!(found[1].coverage, vec![1, 2]);
        assert_eq!(found[1].prefix_coverage, vec![1]);
        assert!(completions(path, "x").unwrap().is_empty());
    }

    #[test]
    fn line_shows_coverage() {
        let line = CompletionLine {
            phrase: "chaton".into(),
            coverage: vec![1, 2],
            prefix_coverage: vec![1],
        };
        assert_eq!(format_line(2, &line), "# 2: chaton  [src 1-2, prefix 1]");

        let bare = CompletionLine {
            phrase: "chat".into(),
            coverage: Vec::new(),
            prefix_coverage: Vec::new(),
        };
        assert_eq!(format_line(1, &bare), "# 1: chat  [src -]");
    }

    #[test]
    fn missing_predictions_key() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{}").unwrap();
        assert!(matches!(
            completions(file.path().to_str().unwrap(), "c"),
            Err(CliError::Response(_))
        ));
    }
}
