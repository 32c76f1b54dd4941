//! # Storage Kernel Benchmark
//!
//! Throughput of the three hot paths: component insertion, dense pool
//! iteration, and the two-pool intersection query with asymmetric pool
//! sizes (the driver heuristic's home turf).
//!
//! Run with: `cargo bench --package typhon_core`

// Benchmarks don't need docs and may have intentionally unused code
#![allow(missing_docs)]
#![allow(dead_code)]

use bytemuck::{Pod, Zeroable};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use typhon_core::{ComponentId, Registry};

#[derive(Clone, Copy, Debug, Default, Pod, Zeroable)]
#[repr(C)]
struct Position {
    x: f32,
    y: f32,
    z: f32,
}

#[derive(Clone, Copy, Debug, Default, Pod, Zeroable)]
#[repr(C)]
struct Velocity {
    x: f32,
    y: f32,
    z: f32,
}

const POSITION: ComponentId = ComponentId::from_name("Position");
const VELOCITY: ComponentId = ComponentId::from_name("Velocity");

/// Registry with `count` entities all carrying Position, every eighth one
/// carrying Velocity as well.
fn populated_registry(count: u32) -> Registry {
    let mut registry = Registry::new();
    registry
        .register_component::<Position>(POSITION, count as usize)
        .unwrap();
    registry
        .register_component::<Velocity>(VELOCITY, count as usize)
        .unwrap();

    for i in 0..count {
        let entity = registry.new_entity().unwrap();
        registry
            .insert_component(
                entity,
                POSITION,
                Position {
                    x: i as f32,
                    y: 0.0,
                    z: 0.0,
                },
            )
            .unwrap();
        if i % 8 == 0 {
            registry
                .insert_component(entity, VELOCITY, Velocity::default())
                .unwrap();
        }
    }
    registry
}

/// Benchmark: attach one component to each of N entities.
fn bench_insert_components(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_components");

    for count in [1_000u32, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let mut registry = Registry::new();
                registry
                    .register_component::<Position>(POSITION, count as usize)
                    .unwrap();
                for _ in 0..count {
                    let entity = registry.new_entity().unwrap();
                    registry
                        .insert_component(entity, POSITION, Position::default())
                        .unwrap();
                }
                registry.entities_created()
            });
        });
    }

    group.finish();
}

/// Benchmark: dense scan of one pool.
fn bench_iterate_component(c: &mut Criterion) {
    let registry = populated_registry(100_000);

    c.bench_function("iterate_100k_positions", |b| {
        b.iter(|| {
            let mut sum = 0.0f32;
            registry
                .iterate_component::<Position>(POSITION, |_, position| {
                    sum += position.x;
                })
                .unwrap();
            black_box(sum)
        });
    });
}

/// Benchmark: intersection query where the driver pool is 8x smaller than
/// the other candidate.
fn bench_system_asymmetric(c: &mut Criterion) {
    let registry = populated_registry(100_000);

    c.bench_function("system_position_velocity_100k", |b| {
        b.iter(|| {
            let mut matched = 0u32;
            registry
                .system(&[POSITION, VELOCITY], |entity, _| {
                    matched += 1;
                    black_box(entity);
                })
                .unwrap();
            black_box(matched)
        });
    });
}

criterion_group!(
    benches,
    bench_insert_components,
    bench_iterate_component,
    bench_system_asymmetric
);
criterion_main!(benches);
