use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ptm_core::candidate::{Candidate, CandidateList, ChunkVector};
use ptm_core::ranker::{RankerConfig, SuggestionRanker};
use ptm_core::trie::PrefixTrie;

const WORDS: &[&str] = &[
    "le", "chat", "s'est", "assis", "sur", "le", "tapis", "rouge", "près", "de", "la", "fenêtre",
];
const SYNONYMS: &[&str] = &["un", "chaton", "était", "couché", "dans", "une", "maison"];

/// 100 hypotheses of 12 tokens with a diagonal alignment and word swaps.
fn bench_candidates() -> CandidateList {
    let align: Vec<String> = (0..WORDS.len()).map(|i| format!("{i}-{i}")).collect();
    (0..100)
        .map(|n| {
            let tokens: Vec<String> = WORDS
                .iter()
                .enumerate()
                .map(|(i, w)| {
                    if (n + i) % 5 == 0 {
                        SYNONYMS[(n + i) % SYNONYMS.len()].to_string()
                    } else {
                        w.to_string()
                    }
                })
                .collect();
            Candidate::new(tokens, &align)
        })
        .collect()
}

fn config() -> RankerConfig {
    RankerConfig {
        max_precomputed: 100,
        max_visible: 4,
        expanded_candidates: 1,
        cover_unaligned: true,
    }
}

fn bench_rank(c: &mut Criterion) {
    let list = bench_candidates();
    let chunks = ChunkVector::new(vec![0, 0, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3]);
    let ranker = SuggestionRanker::new(config());
    let mut group = c.benchmark_group("suggestions/rank");
    for base in [0usize, 4, 8] {
        group.bench_with_input(BenchmarkId::from_parameter(base), &base, |b, &base| {
            b.iter(|| ranker.rank(&list, &chunks, base));
        });
    }
    group.finish();
}

fn bench_trie(c: &mut Criterion) {
    let phrases: Vec<String> = bench_candidates()
        .iter()
        .flat_map(|cand| (1..=cand.len()).map(|n| cand.tokens[..n].join(" ")).collect::<Vec<_>>())
        .collect();
    let trie = PrefixTrie::from_phrases(&phrases);
    c.bench_function("suggestions/trie_find_all", |b| {
        b.iter(|| trie.find_all("le ch"));
    });
}

criterion_group!(benches, bench_rank, bench_trie);
criterion_main!(benches);
