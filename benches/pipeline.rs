//! Benchmarks for the deck pipeline.

use std::fs;
use std::path::PathBuf;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use mcdeck::parser::read_cards;
use mcdeck::{parse_deck, serialize, validate_deck};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn load_fixture(name: &str) -> String {
    fs::read_to_string(fixtures_dir().join(name)).unwrap()
}

/// A lattice-style deck with `n` cells, each bounded by its own sphere.
fn generated_deck(n: usize) -> String {
    let mut text = String::from("generated spheres\n");
    for i in 1..=n {
        text.push_str(&format!("{i} 1 -1.0 -{i} #{} imp:n=1\n", if i > 1 { i - 1 } else { n }));
    }
    text.push('\n');
    for i in 1..=n {
        text.push_str(&format!("{i} s {}.5 0 0 0.25\n", i));
    }
    text.push_str("\nmode n\nnps 1e6\nm1 1001.80c 2 8016.80c 1\n");
    text
}

// -- Parsing benchmarks --

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");

    let pincell = load_fixture("pincell.i");
    let large = generated_deck(1000);

    group.bench_function("read_cards_pincell", |b| {
        b.iter(|| read_cards(black_box(&pincell)).count())
    });

    group.bench_function("parse_pincell", |b| {
        b.iter(|| parse_deck(black_box(&pincell)).unwrap())
    });

    group.bench_function("parse_1000_cells", |b| {
        b.iter(|| parse_deck(black_box(&large)).unwrap())
    });

    group.finish();
}

// -- Validation benchmarks --

fn bench_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("validation");

    let pincell = parse_deck(&load_fixture("pincell.i")).unwrap();
    let large = parse_deck(&generated_deck(1000)).unwrap();

    group.bench_function("validate_pincell", |b| {
        b.iter(|| validate_deck(black_box(&pincell)))
    });

    group.bench_function("validate_1000_cells", |b| {
        b.iter(|| validate_deck(black_box(&large)))
    });

    group.finish();
}

// -- Serialization benchmarks --

fn bench_serialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialization");

    let pincell = parse_deck(&load_fixture("pincell.i")).unwrap();
    let large = parse_deck(&generated_deck(1000)).unwrap();

    group.bench_function("serialize_pincell", |b| {
        b.iter(|| serialize(black_box(&pincell)).unwrap())
    });

    group.bench_function("serialize_1000_cells", |b| {
        b.iter(|| serialize(black_box(&large)).unwrap())
    });

    group.bench_function("round_trip_pincell", |b| {
        b.iter(|| parse_deck(&serialize(black_box(&pincell)).unwrap()).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_parsing, bench_validation, bench_serialization);
criterion_main!(benches);
