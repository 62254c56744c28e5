//! Word alignment between a source sentence and one candidate translation.
//!
//! The translation service returns alignments as flat `"i-j"` strings, where
//! `i` is a source token index and `j` a target token index. `AlignmentIndex`
//! keeps both directions so lookups from either side are O(1).

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use tracing::debug;

/// One (source, target) token correspondence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AlignmentPair {
    pub source: usize,
    pub target: usize,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum AlignmentError {
    #[error("missing '-' separator: {0:?}")]
    MissingSeparator(String),
    #[error("invalid source index: {0:?}")]
    InvalidSource(String),
    #[error("invalid target index: {0:?}")]
    InvalidTarget(String),
}

impl FromStr for AlignmentPair {
    type Err = AlignmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (src, tgt) = s
            .split_once('-')
            .ok_or_else(|| AlignmentError::MissingSeparator(s.to_string()))?;
        let source = src
            .trim()
            .parse()
            .map_err(|_| AlignmentError::InvalidSource(s.to_string()))?;
        let target = tgt
            .trim()
            .parse()
            .map_err(|_| AlignmentError::InvalidTarget(s.to_string()))?;
        Ok(Self { source, target })
    }
}

impl fmt::Display for AlignmentPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.source, self.target)
    }
}

/// Source→target and target→source alignment maps for one candidate.
///
/// An index missing from a map means the token is unaligned. Per-key index
/// lists keep insertion order and may contain repeats if the service sent
/// the same pair twice; consumers sort and dedup where order matters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlignmentIndex {
    s2t: HashMap<usize, Vec<usize>>,
    t2s: HashMap<usize, Vec<usize>>,
}

impl AlignmentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw `"i-j"` strings. Malformed pairs are skipped.
    pub fn build<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = Self::new();
        for raw in pairs {
            match raw.as_ref().parse::<AlignmentPair>() {
                Ok(pair) => index.insert(pair),
                Err(e) => debug!(error = %e, "skipping malformed alignment pair"),
            }
        }
        index
    }

    pub fn insert(&mut self, pair: AlignmentPair) {
        self.s2t.entry(pair.source).or_default().push(pair.target);
        self.t2s.entry(pair.target).or_default().push(pair.source);
    }

    /// Target indices aligned to `source`; empty when unaligned.
    pub fn targets_of(&self, source: usize) -> &[usize] {
        self.s2t.get(&source).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Source indices aligned to `target`; empty when unaligned.
    pub fn sources_of(&self, target: usize) -> &[usize] {
        self.t2s.get(&target).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_source_aligned(&self, source: usize) -> bool {
        self.s2t.contains_key(&source)
    }

    pub fn is_target_aligned(&self, target: usize) -> bool {
        self.t2s.contains_key(&target)
    }

    pub fn is_empty(&self) -> bool {
        self.s2t.is_empty()
    }

    /// All pairs, sorted by (source, target). Repeats are preserved.
    pub fn pairs(&self) -> Vec<AlignmentPair> {
        let mut pairs: Vec<AlignmentPair> = self
            .s2t
            .iter()
            .flat_map(|(&source, targets)| {
                targets
                    .iter()
                    .map(move |&target| AlignmentPair { source, target })
            })
            .collect();
        pairs.sort_by_key(|p| (p.source, p.target));
        pairs
    }
}
