//! Criterion benchmarks for block and toolbox generation.
//!
//! Run with: `cargo bench`
//!
//! These benchmarks measure the load path after the fetch completes
//! (decode, derive, register, build toolbox) and the per-edit relay cost.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::json;

use playbook_blocks::core::play::PlayList;
use playbook_blocks::core::registry::BlockTypes;
use playbook_blocks::loader::register_play_list;
use playbook_blocks::relay::{SharedWorkspace, WorkspaceRelay};
use playbook_blocks::PlaygroundConfig;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn dump_body(plays: usize) -> Vec<u8> {
    let plays: Vec<_> = (0..plays)
        .map(|i| {
            if i % 3 == 0 {
                json!({ "description": format!("Play {}", i) })
            } else {
                json!({ "description": format!("Play {}", i), "context": format!("step {}", i) })
            }
        })
        .collect();
    serde_json::to_vec(&json!({ "category": "Recon", "plays": plays })).unwrap()
}

// ---------------------------------------------------------------------------
// Load Benchmarks
// ---------------------------------------------------------------------------

fn bench_load_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("load_path");
    let config = PlaygroundConfig::default();

    for size in [10usize, 100, 1000] {
        let body = dump_body(size);
        group.bench_with_input(BenchmarkId::new("decode_register_toolbox", size), &body, |b, body| {
            b.iter(|| {
                let list = PlayList::from_json_slice(black_box(body)).unwrap();
                let registry = BlockTypes::new();
                black_box(register_play_list(&list, &registry, &config).unwrap())
            })
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Relay Benchmarks
// ---------------------------------------------------------------------------

fn bench_relay(c: &mut Criterion) {
    let mut group = c.benchmark_group("relay");
    let relay = WorkspaceRelay::new(SharedWorkspace::new());

    for size in [1usize, 50, 500] {
        let blocks: Vec<_> = (0..size)
            .map(|i| json!({ "type": format!("block_{}", i), "x": i * 10, "y": 20 }))
            .collect();
        let event = json!({ "blocks": { "languageVersion": 0, "blocks": blocks } });

        group.bench_with_input(BenchmarkId::new("handle_change", size), &event, |b, event| {
            b.iter(|| relay.handle_change(black_box(event)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_load_path, bench_relay);
criterion_main!(benches);
