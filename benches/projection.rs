//! Benchmarks for dataset synthesis and split projection.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use mmkg_synth::config::SynthConfig;
use mmkg_synth::dataset::Dataset;
use mmkg_synth::export::to_json_bytes;
use mmkg_synth::partition::{Partitioner, Split};

fn large_config() -> SynthConfig {
    let mut config = SynthConfig::default();
    config.universe.size = 10_000;
    config.graph.triples = 50_000;
    config
}

fn bench_synthesize(c: &mut Criterion) {
    let config = large_config();
    c.bench_function("synthesize_10k", |bench| {
        bench.iter(|| black_box(Dataset::synthesize(&config).unwrap()))
    });
}

fn bench_project(c: &mut Criterion) {
    let config = large_config();
    let dataset = Dataset::synthesize(&config).unwrap();
    let partitioner = Partitioner::new(config.split_ratios(), config.split.seed).unwrap();
    let partition = dataset.partition(&partitioner).unwrap();

    c.bench_function("project_train_10k", |bench| {
        bench.iter(|| black_box(dataset.project(&partition.train)))
    });
}

fn bench_serialize(c: &mut Criterion) {
    let config = large_config();
    let dataset = Dataset::synthesize(&config).unwrap();
    let partitioner = Partitioner::new(config.split_ratios(), config.split.seed).unwrap();
    let partition = dataset.partition(&partitioner).unwrap();
    let train = dataset.project(&partition.train);

    c.bench_function("serialize_train_10k", |bench| {
        bench.iter(|| black_box(to_json_bytes(Split::Train, &train).unwrap()))
    });
}

criterion_group!(benches, bench_synthesize, bench_project, bench_serialize);
criterion_main!(benches);
