//! Performance benchmarks for ferro-gene-matcher
//!
//! Run with: cargo bench
//! Run specific benchmark: cargo bench -- cascade

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ferro_gene_matcher::matcher::{find_override, DEFAULT_CASCADE};
use ferro_gene_matcher::{GeneEntry, GeneReference, Matcher};

/// Pairs exercising every cascade step, plus unresolved ones
const PAIRS: [(&str, &str); 8] = [
    ("TP53", "17"),
    ("HER2", "17"),
    ("CSF2RA", "X"),
    ("HNPCC1", "2|5"),
    ("RASK2", "12|1"),
    ("1-Mar", "4"),
    ("NOTAGENE", "1"),
    ("P53", "3"),
];

fn batch(size: usize) -> (Vec<&'static str>, Vec<&'static str>) {
    PAIRS.iter().cycle().take(size).copied().unzip()
}

/// Synthetic reference of `size` genes with a few synonyms each
fn synthetic_reference(size: usize) -> GeneReference {
    let entries = (0..size as u64)
        .map(|i| {
            let chromosome = match i % 25 {
                23 => "X".to_string(),
                24 => "X|Y".to_string(),
                n => (n + 1).to_string(),
            };
            GeneEntry::new(i + 1, format!("GENE{}", i), chromosome)
                .with_synonyms(&format!("ALIAS{}|ALT{}|G{}", i, i % 1000, i))
                .with_gene_type(if i % 10 == 0 { "pseudo" } else { "protein-coding" })
        })
        .collect();
    GeneReference::from_entries(entries).unwrap()
}

// =============================================================================
// Cascade benchmarks
// =============================================================================

/// Benchmark whole batches against the built-in test data
fn bench_cascade(c: &mut Criterion) {
    let reference = Arc::new(GeneReference::with_test_data());
    let mut group = c.benchmark_group("cascade");

    for size in [100usize, 1_000, 10_000] {
        let (symbols, chromosomes) = batch(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("submit_batch", size), &size, |b, _| {
            let mut matcher = Matcher::new(Arc::clone(&reference));
            b.iter(|| {
                let result = matcher
                    .submit_batch(black_box(&symbols), black_box(&chromosomes))
                    .unwrap();
                black_box(result.n_matched())
            })
        });
    }

    group.finish();
}

/// Benchmark single-rule lookups on a large synthetic reference
fn bench_rule_lookup(c: &mut Criterion) {
    let reference = synthetic_reference(50_000);
    let mut group = c.benchmark_group("rule_lookup");

    for rule in DEFAULT_CASCADE {
        group.bench_function(rule.label(), |b| {
            b.iter(|| rule.find(&reference, black_box("ALT500"), black_box("X|Y")))
        });
    }

    group.bench_function("calendar_override", |b| {
        b.iter(|| find_override(black_box("9-Sep"), black_box("17")))
    });

    group.finish();
}

/// Benchmark reference construction
fn bench_reference_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("reference_load");
    group.sample_size(20);
    group.bench_function("from_entries_50k", |b| {
        b.iter(|| synthetic_reference(black_box(50_000)))
    });
    group.finish();
}

criterion_group!(benches, bench_cascade, bench_rule_lookup, bench_reference_load);
criterion_main!(benches);
