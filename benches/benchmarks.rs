//! Benchmark suite for healthcost.
//!
//! This module provides performance benchmarks for:
//! - Feature encoding (raw input to feature row)
//! - Full prediction (encode, scale, invoke) for each age bracket
//! - Artifact store loading (read, decode, validate, digest)
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench
//! cargo bench -- --save-baseline main
//! cargo bench -- --baseline main
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;
use tempfile::TempDir;

use healthcost::testing::STANDARD_ARTIFACTS;
use healthcost::{encode, ArtifactStore, Predictor, RawInput};

fn applicant(age: i32) -> RawInput {
    RawInput::new()
        .with("Age", age)
        .with("Gender", "Male")
        .with("Region", "Southeast")
        .with("Marital Status", "Unmarried")
        .with("BMI Category", "Overweight")
        .with("Smoking Status", "Regular")
        .with("Employment Status", "Salaried")
        .with("Insurance Plan", "Gold")
        .with("Number of Dependants", 2)
        .with("Income in Lakhs", 10)
        .with("Genetical Risk", 3)
        .with("Medical History", "diabetes & high blood pressure")
}

fn load_store() -> (TempDir, ArtifactStore) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    for (name, content) in STANDARD_ARTIFACTS {
        std::fs::write(temp_dir.path().join(name), content).expect("Failed to write artifact");
    }
    let store = ArtifactStore::load(temp_dir.path()).expect("Failed to load artifacts");
    (temp_dir, store)
}

fn bench_encode(c: &mut Criterion) {
    let raw = applicant(30);
    c.bench_function("encode", |b| b.iter(|| encode(black_box(&raw))));
}

fn bench_predict(c: &mut Criterion) {
    let mut group = c.benchmark_group("predict");
    let (_temp_dir, store) = load_store();
    let predictor = Predictor::new(Arc::new(store));

    for (bracket, age) in [("young", 22), ("rest", 48)] {
        let raw = applicant(age);
        group.bench_with_input(BenchmarkId::new("bracket", bracket), &raw, |b, raw| {
            b.iter(|| predictor.predict(black_box(raw)))
        });
    }

    group.finish();
}

fn bench_load(c: &mut Criterion) {
    c.bench_function("artifact_store_load", |b| b.iter(load_store));
}

criterion_group!(benches, bench_encode, bench_predict, bench_load);
criterion_main!(benches);
