//! Criterion benchmarks for rule indexing and the resolution scan.
//!
//! Two benchmark groups:
//! - `index_build`: 2000 texture rules, 500 icon rules over 50 body parts
//! - `scan`: 5000 parts reached through 1000 operations

use criterion::{criterion_group, criterion_main, Criterion};
use partskin_core::catalog::{HostCatalog, HostCatalogBuilder};
use partskin_core::engine::ResolutionEngine;
use partskin_core::index::RuleIndex;
use partskin_core::rule::{IconRule, TextureRule};
use partskin_core::scan::{ProcessedSet, Scanner};
use partskin_core::test_utils::*;

// ===========================================================================
// Catalog builders
// ===========================================================================

const BODY_PARTS: usize = 50;
const TEXTURES: usize = 200;

fn build_rules() -> (Vec<TextureRule>, Vec<IconRule>) {
    let mut textures = Vec::with_capacity(2000);
    for i in 0..2000 {
        let source = format!("tex/{}", i % TEXTURES);
        // Every third rule is name-filtered so buckets mix both kinds.
        if i % 3 == 0 {
            textures.push(texture_rule_named(&format!("T{i}"), &source, "Left", red()));
        } else {
            textures.push(texture_rule(&format!("T{i}"), &source, blue()));
        }
    }

    let mut icons = Vec::with_capacity(500);
    for i in 0..500 {
        let a = format!("bp{}", i % BODY_PARTS);
        let b = format!("bp{}", (i + 7) % BODY_PARTS);
        let texture = format!("icon/{i}");
        if i % 4 == 0 {
            icons.push(icon_rule_named(&format!("I{i}"), &[a.as_str(), b.as_str()], "Arm", &texture));
        } else {
            icons.push(icon_rule(&format!("I{i}"), &[a.as_str(), b.as_str()], &texture));
        }
    }
    (textures, icons)
}

/// 5000 overridable parts, 1000 operations with 5 ingredients each on 2 body parts.
fn build_catalog() -> HostCatalog {
    let mut b = HostCatalogBuilder::new();
    for i in 0..BODY_PARTS {
        b.register_body_part(format!("bp{i}").as_str());
    }
    for i in 0..5000 {
        let name = if i % 2 == 0 { format!("LeftArm{i}") } else { format!("Leg{i}") };
        b.register_part(overridable_part(&name, &format!("tex/{}", i % TEXTURES)));
    }
    for op in 0..1000 {
        let body_parts = [format!("bp{}", op % BODY_PARTS), format!("bp{}", (op + 1) % BODY_PARTS)];
        let ingredients: Vec<String> = (0..5)
            .map(|k| {
                let i = op * 5 + k;
                if i % 2 == 0 { format!("LeftArm{i}") } else { format!("Leg{i}") }
            })
            .collect();
        let body_refs: Vec<&str> = body_parts.iter().map(String::as_str).collect();
        let ingredient_refs: Vec<&str> = ingredients.iter().map(String::as_str).collect();
        b.register_operation(operation_with_effect(
            &format!("Op{op}"),
            &body_refs,
            &ingredient_refs,
            op % 2 == 0,
        ));
    }
    b.build().unwrap()
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_index_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_build");
    group.sample_size(50);

    let catalog = build_catalog();
    let (textures, icons) = build_rules();

    group.bench_function("2000_texture_500_icon_rules", |b| {
        b.iter(|| RuleIndex::build(textures.clone(), icons.clone(), &catalog));
    });

    group.finish();
}

fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan");
    group.sample_size(20);

    let catalog = build_catalog();
    let (textures, icons) = build_rules();
    let index = RuleIndex::build(textures, icons, &catalog);
    let scanner = Scanner::new(ResolutionEngine::new(&index));

    group.bench_function("5000_parts_1000_operations", |b| {
        b.iter(|| scanner.scan(&catalog, catalog.operations(), &mut ProcessedSet::new()));
    });

    group.finish();
}

criterion_group!(benches, bench_index_build, bench_scan);
criterion_main!(benches);
