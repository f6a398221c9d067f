//! Benchmarks for normalization and the diff engine.

use bundle_log_tools::diff::diff;
use bundle_log_tools::model::DependencyIndex;
use bundle_log_tools::parsers::normalize;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::{json, Value};
use std::hint::black_box;

/// Generate a pair-list build log with `assets` assets spread over
/// `assets / 4` bundles. `generation` perturbs every tenth bundle.
fn generate_log(assets: usize, generation: usize) -> Value {
    let bundle_count = (assets / 4).max(1);
    let hash = |b: usize| format!("{b:08x}");

    let pairs: Vec<Value> = (0..assets)
        .map(|a| {
            json!({
                "first": format!("Assets/Generated/asset_{a}.png"),
                "second": [{"first": hash(a % bundle_count), "second": [format!("guid-{a}")]}]
            })
        })
        .collect();

    let mut bundles = serde_json::Map::new();
    for b in 0..bundle_count {
        let files: Vec<Value> = (0..assets)
            .filter(|a| a % bundle_count == b)
            .map(|a| {
                let size = if b % 10 == 0 { a + generation } else { a };
                json!({
                    "asset_path": format!("Assets/Generated/asset_{a}.png"),
                    "guid": format!("guid-{a}"),
                    "size": size
                })
            })
            .collect();
        bundles.insert(hash(b), json!({"crc": b, "files": files}));
    }

    json!({"assets": pairs, "bundles": bundles})
}

fn benchmark_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    for assets in [1_000, 10_000] {
        let raw = generate_log(assets, 0);
        group.bench_with_input(BenchmarkId::from_parameter(assets), &raw, |b, raw| {
            b.iter(|| normalize(black_box(raw)));
        });
    }
    group.finish();
}

fn benchmark_diff(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff");
    for assets in [1_000, 10_000] {
        let previous = normalize(&generate_log(assets, 0));
        let current = normalize(&generate_log(assets, 1));
        group.bench_with_input(
            BenchmarkId::from_parameter(assets),
            &(current, previous),
            |b, (current, previous)| {
                b.iter(|| diff(black_box(current), black_box(previous)));
            },
        );
    }
    group.finish();
}

fn benchmark_index(c: &mut Criterion) {
    let snapshot = normalize(&generate_log(10_000, 0));
    c.bench_function("index_build_10000", |b| {
        b.iter(|| DependencyIndex::build(black_box(&snapshot)));
    });
}

criterion_group!(benches, benchmark_normalize, benchmark_diff, benchmark_index);
criterion_main!(benches);
