//! Benchmark for face visibility decisions.
//!
//! TARGET: a full 16x16x16 section (6 faces per block) well under a frame
//!
//! Run with: cargo bench --package infinite_render --bench visibility_benchmark

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use infinite_core::{FeatureRegistry, SettingValue};
use infinite_render::xray::{self, OPACITY, XRAY};
use infinite_render::{BlockVisibilityQuery, FacePass, Neighbor, VisibilityResolver};
use infinite_shared::{BlockPos, Direction};

const SECTION: i32 = 16;

fn registry(opacity: f64) -> FeatureRegistry {
    let mut registry = FeatureRegistry::new();
    registry.register(xray::feature()).unwrap();
    registry
        .set_setting(XRAY, OPACITY.name(), SettingValue::Float(opacity))
        .unwrap();
    registry.enable(XRAY).unwrap();
    registry
}

fn block_at(pos: BlockPos) -> &'static str {
    match (pos.x ^ pos.y ^ pos.z) & 31 {
        0 => "minecraft:diamond_ore",
        1 => "minecraft:air",
        _ => "minecraft:stone",
    }
}

fn resolve_section(resolver: &VisibilityResolver<'_>) -> usize {
    let mut drawn = 0;
    for x in 0..SECTION {
        for y in 0..SECTION {
            for z in 0..SECTION {
                let pos = BlockPos::new(x, y, z);
                for side in Direction::ALL {
                    let neighbor = match block_at(pos.offset(side)) {
                        "minecraft:air" => Neighbor::Air,
                        id => Neighbor::Block(id),
                    };
                    let query = BlockVisibilityQuery::new(block_at(pos), pos, side).with_neighbor(neighbor);
                    if FacePass::begin(resolver, black_box(&query)).should_draw(true) {
                        drawn += 1;
                    }
                }
            }
        }
    }
    drawn
}

fn benchmark_single_face(c: &mut Criterion) {
    let registry = registry(0.0);
    let resolver = VisibilityResolver::new(&registry);
    let query = BlockVisibilityQuery::new("minecraft:stone", BlockPos::new(3, 40, 7), Direction::East)
        .with_neighbor(Neighbor::Block("minecraft:deepslate"));

    c.bench_function("resolve_single_face", |b| {
        b.iter(|| black_box(resolver.resolve_side(black_box(&query))));
    });
}

fn benchmark_section(c: &mut Criterion) {
    let faces = u64::from(SECTION.unsigned_abs()).pow(3) * 6;
    let mut group = c.benchmark_group("section_faces");
    group.throughput(Throughput::Elements(faces));

    for (name, opacity) in [("hide_mode", 0.0), ("opacity_mode", 0.5)] {
        let registry = registry(opacity);
        let resolver = VisibilityResolver::new(&registry);
        group.bench_function(name, |b| b.iter(|| black_box(resolve_section(&resolver))));
    }

    group.finish();
}

criterion_group!(benches, benchmark_single_face, benchmark_section);
criterion_main!(benches);
