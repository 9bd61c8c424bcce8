//! Per-group statistics benchmarks.
//!
//! Benchmarks: outlier consensus + selection + confidence for one group, and
//! a full pipeline run over many colonies.
//! Run with: cargo bench -p casa-analysis --bench group_stats_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use casa_analysis::confidence::{ConfidenceInputs, ConfidenceScorer};
use casa_analysis::outliers::OutlierDetector;
use casa_analysis::representative::RepresentativeSelector;
use casa_analysis::ValidationPipeline;
use casa_core::config::EngineConfig;
use casa_core::types::{Operation, PropertyType, Record, Variable};

/// Deterministic spread of price-per-area values with a few spikes.
fn group_values(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let base = 40_000.0 + ((i * 7919) % 1000) as f64 * 20.0;
            if i % 37 == 0 { base * 4.0 } else { base }
        })
        .collect()
}

fn records(groups: usize, per_group: usize) -> Vec<Record> {
    (0..groups * per_group)
        .map(|i| {
            let colony = format!("colony_{:03}", i % groups);
            let area = 50.0 + (i % 90) as f64;
            let mut r = Record::new(
                format!("L{i}"),
                "cdmx",
                Operation::Sale,
                PropertyType::Apartment,
                colony,
                area,
                area * (35_000.0 + (i % 400) as f64 * 50.0),
            );
            r.bedrooms = Some(2.0);
            r.bathrooms = Some(2.0);
            r.parking_spots = Some(1.0);
            r
        })
        .collect()
}

fn single_group(c: &mut Criterion) {
    let mut group = c.benchmark_group("group_statistics");
    let detector = OutlierDetector::with_defaults();
    let selector = RepresentativeSelector::default();
    let scorer = ConfidenceScorer::default();

    for n in [10, 100, 1_000, 10_000] {
        let values = group_values(n);
        group.bench_with_input(BenchmarkId::new("detect_select_score", n), &values, |b, values| {
            b.iter(|| {
                let outliers =
                    detector.detect(black_box(values), Variable::PricePerArea, Operation::Sale);
                let (profile, selection) = selector.evaluate(values);
                let inputs = ConfidenceInputs::from_profile(&profile, outliers.outlier_ratio());
                let confidence = scorer.score(&inputs);
                black_box((selection, confidence));
            });
        });
    }
    group.finish();
}

fn full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    group.sample_size(10);
    let pipeline = ValidationPipeline::new(&EngineConfig::default());

    for groups in [10, 100] {
        let input = records(groups, 60);
        group.bench_with_input(BenchmarkId::new("run", groups), &input, |b, input| {
            b.iter(|| black_box(pipeline.run(input.clone())));
        });
    }
    group.finish();
}

criterion_group!(benches, single_group, full_pipeline);
criterion_main!(benches);
