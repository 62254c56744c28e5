//! Find the span of a candidate that continues the user's prefix.
//!
//! Starting from the target token at the prefix boundary, follow its
//! alignment back to the source, widen to every source token in the same
//! chunk(s) running rightward from the leftmost anchor, then map those source
//! tokens forward again. The first contiguous run of target tokens at or
//! after the boundary is the continuation.

use std::collections::HashSet;

use tracing::trace;

use crate::alignment::AlignmentIndex;
use crate::candidate::{Candidate, ChunkVector};

/// Continuation of `candidate` starting at target token `base`.
pub fn resolve_candidate(candidate: &Candidate, chunks: &ChunkVector, base: usize) -> Option<String> {
    resolve(&candidate.tokens, &candidate.alignment, chunks, base)
}

/// Continuation of `tokens` starting at target token `base`.
///
/// Anchors outside `chunks` are skipped. Returns `None` when the boundary
/// token is unaligned, when no anchor lies inside `chunks`, when the walk
/// reaches a target outside `tokens`, or when no aligned target token lies at
/// or after `base`.
pub fn resolve(
    tokens: &[String],
    alignment: &AlignmentIndex,
    chunks: &ChunkVector,
    base: usize,
) -> Option<String> {
    if !alignment.is_target_aligned(base) {
        return None;
    }

    let mut touched = HashSet::new();
    let mut left_most: Option<usize> = None;
    for &source in alignment.sources_of(base) {
        let Some(chunk) = chunks.chunk_of(source) else {
            trace!(source, base, "anchor outside chunk vector");
            continue;
        };
        touched.insert(chunk);
        left_most = Some(left_most.map_or(source, |m| m.min(source)));
    }
    let left_most = left_most?;

    let mut targets: Vec<usize> = Vec::new();
    for source in left_most..chunks.len() {
        match chunks.chunk_of(source) {
            Some(chunk) if touched.contains(&chunk) => {}
            _ => break,
        }
        targets.extend_from_slice(alignment.targets_of(source));
    }
    targets.sort_unstable();
    targets.dedup();

    let mut run: Vec<&str> = Vec::new();
    let mut last: Option<usize> = None;
    for target in targets {
        if target < base {
            continue;
        }
        if last.is_some_and(|prev| target != prev + 1) {
            // Source reordering; only the first contiguous run is offered.
            break;
        }
        let Some(token) = tokens.get(target) else {
            trace!(target_index = target, len = tokens.len(), "alignment past end of candidate");
            return None;
        };
        run.push(token);
        last = Some(target);
    }

    if run.is_empty() {
        None
    } else {
        Some(run.join(" "))
    }
}
