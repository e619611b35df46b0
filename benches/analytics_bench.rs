//! Derivation throughput over a synthetic region: overview metrics and highlights.
//!
//! Run with: `cargo bench`

use std::collections::BTreeMap;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use genderscope::analytics::{compute_overview, summarize_highlights};
use genderscope::{CountryRecord, Dataset, IndicatorKey};

fn synthetic_record(seed: usize) -> CountryRecord {
    IndicatorKey::ALL
        .iter()
        .enumerate()
        // Every fifth value missing, like a sparse statistics series.
        .filter(|(index, _)| (index + seed) % 5 != 0)
        .fold(CountryRecord::empty(), |record, (index, key)| {
            let value = ((seed * 31 + index * 17) % 1000) as f64 / 10.0;
            record.with(*key, value)
        })
}

fn synthetic_dataset(neighbors: usize) -> Dataset {
    let records: BTreeMap<String, CountryRecord> = (0..neighbors)
        .map(|seed| (format!("Neighbor {seed:02}"), synthetic_record(seed + 1)))
        .collect();
    Dataset::new("Target", synthetic_record(0)).with_neighbors(records)
}

fn bench_analytics(c: &mut Criterion) {
    let mut group = c.benchmark_group("analytics");
    for neighbors in [4usize, 8, 16] {
        let dataset = synthetic_dataset(neighbors);
        group.throughput(Throughput::Elements(dataset.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("compute_overview", neighbors),
            &dataset,
            |b, dataset| b.iter(|| compute_overview(black_box(dataset), 2)),
        );
        group.bench_with_input(
            BenchmarkId::new("summarize_highlights", neighbors),
            &dataset,
            |b, dataset| b.iter(|| summarize_highlights(black_box(dataset))),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_analytics);
criterion_main!(benches);
