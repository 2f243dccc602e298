use criterion::{black_box, criterion_group, criterion_main, Criterion};
use erupt::{EstimatorConfig, LoggedSample, Normalization, PolicyValueEstimator};

// data generating
// functions
mod utils;
use utils::{logged_experiment, random_policies};

pub fn benchmark_estimate(c: &mut Criterion) {
    let (propensity, treatment, outcome) = logged_experiment(1_000_000usize);
    let sample = LoggedSample::new(&propensity, &treatment, &outcome).unwrap();
    let policy = random_policies(1_000_000usize, 1).remove(0);

    let horvitz_thompson = PolicyValueEstimator::default();
    let self_normalized =
        PolicyValueEstimator::new(EstimatorConfig::default().set_normalization(Normalization::SelfNormalized)).unwrap();

    let mut group = c.benchmark_group("Policy value");
    group.bench_function("Horvitz-Thompson estimate", |b| {
        b.iter(|| horvitz_thompson.estimate(black_box(&sample), black_box(&policy)))
    });
    group.bench_function("Self-normalized estimate", |b| {
        b.iter(|| self_normalized.estimate(black_box(&sample), black_box(&policy)))
    });
    group.finish();
}

pub fn benchmark_batch(c: &mut Criterion) {
    let (propensity, treatment, outcome) = logged_experiment(100_000usize);
    let sample = LoggedSample::new(&propensity, &treatment, &outcome).unwrap();
    let policies = random_policies(100_000usize, 64);

    let single_thread = PolicyValueEstimator::new(EstimatorConfig::default().set_num_threads(Some(1))).unwrap();
    let all_threads = PolicyValueEstimator::default();

    let mut group = c.benchmark_group("Batch evaluation");
    group.sample_size(10);
    group.bench_function("64 policies, 1 thread", |b| {
        b.iter(|| single_thread.evaluate_policies(black_box(&sample), black_box(&policies)))
    });
    group.bench_function("64 policies, all threads", |b| {
        b.iter(|| all_threads.evaluate_policies(black_box(&sample), black_box(&policies)))
    });
    group.finish();
}

criterion_group!(benches, benchmark_estimate, benchmark_batch);
criterion_main!(benches);
