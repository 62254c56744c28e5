use std::fs;
use std::path::PathBuf;

use ptm_core::candidate::{CandidateList, ChunkVector};
use ptm_core::response::{parse_translation_response, ResponseError};
use ptm_core::settings::SettingsError;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            std::process::exit(1);
        })
    };
}

pub mod complete_ops;
pub mod config_ops;
pub mod suggest_ops;
pub mod word_ops;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Response(#[from] ResponseError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("invalid chunk vector {0:?}: expected comma-separated indices")]
    InvalidChunks(String),
    #[error("candidate {index} out of range ({len} candidates)")]
    NoCandidate { index: usize, len: usize },
    #[error("source token {index} out of range ({len} tokens)")]
    NoSourceToken { index: usize, len: usize },
}

pub(crate) fn read_file(path: &str) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Io {
        path: PathBuf::from(path),
        source,
    })
}

/// Parse `"0,0,1,1"` into a chunk vector. An empty string is no chunks.
pub fn parse_chunks(raw: &str) -> Result<ChunkVector, CliError> {
    if raw.trim().is_empty() {
        return Ok(ChunkVector::default());
    }
    raw.split(',')
        .map(|part| part.trim().parse::<usize>())
        .collect::<Result<Vec<_>, _>>()
        .map(ChunkVector::new)
        .map_err(|_| CliError::InvalidChunks(raw.to_string()))
}

pub fn load_candidates(path: &str) -> Result<CandidateList, CliError> {
    let json = read_file(path)?;
    Ok(parse_translation_response(&json)?)
}
