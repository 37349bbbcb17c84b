//! Benchmarks for the trace generators.
//!
//! Trace generation is O(steps), and steps carry cumulative snapshots,
//! so these benchmarks mostly measure how snapshot cost scales with
//! input size — useful when tuning the copy-on-write trie.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use matchtrace::prelude::*;

fn periodic_text(len: usize) -> String {
    "abcab".chars().cycle().take(len).collect()
}

fn bench_single_pattern_generators(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_pattern");

    for len in [64usize, 256, 1024] {
        let text = periodic_text(len);
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("naive", len), &text, |b, text| {
            b.iter(|| generate_naive_steps(black_box(text), black_box("abcab")));
        });
        group.bench_with_input(BenchmarkId::new("kmp", len), &text, |b, text| {
            b.iter(|| generate_kmp_steps(black_box(text), black_box("abcab")));
        });
        group.bench_with_input(BenchmarkId::new("rabin_karp", len), &text, |b, text| {
            b.iter(|| generate_rk_steps(black_box(text), black_box("abcab")));
        });
    }

    group.finish();
}

fn bench_aho_corasick(c: &mut Criterion) {
    let mut group = c.benchmark_group("aho_corasick");

    let patterns = "arrows, row, sun, under, understand, around";
    for len in [32usize, 128, 512] {
        let text = "arrows flew under the sun in a row "
            .chars()
            .cycle()
            .take(len)
            .collect::<String>();
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::new("full_trace", len), &text, |b, text| {
            b.iter(|| generate_ac_steps(black_box(text), black_box(patterns)));
        });
    }

    let pattern_lists = [
        ("few", "he, she"),
        ("classic", "he, she, his, hers"),
        ("many", "he, she, his, hers, here, where, her, see, sea, ashes"),
    ];
    for (name, list) in pattern_lists {
        group.bench_function(BenchmarkId::new("build_only", name), |b| {
            let patterns = parse_patterns(list);
            b.iter(|| build_automaton(black_box(&patterns)));
        });
    }

    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let patterns = parse_patterns("he, she, his, hers, here, where, her, see, sea, ashes");
    let (trie, _) = build_automaton(&patterns);

    c.bench_function("trie_layout", |b| {
        b.iter(|| calculate_trie_layout(black_box(&trie)));
    });
}

criterion_group!(
    benches,
    bench_single_pattern_generators,
    bench_aho_corasick,
    bench_layout
);
criterion_main!(benches);
