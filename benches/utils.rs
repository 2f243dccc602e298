#![allow(dead_code)]
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// logged_experiment
//
// Generates (propensity, treatment, outcome)-tuple for a
// binary experiment whose treatment probability depends
// on a single uniform feature.
pub(crate) fn logged_experiment(n_samples: usize) -> (Vec<f64>, Vec<usize>, Vec<f64>) {
    // reproducible seed
    let mut rng = StdRng::seed_from_u64(1903);

    let mut propensity: Vec<f64> = Vec::with_capacity(n_samples);
    let mut treatment: Vec<usize> = Vec::with_capacity(n_samples);
    let mut outcome: Vec<f64> = Vec::with_capacity(n_samples);

    for _ in 0..n_samples {
        let x: f64 = rng.gen();
        let p_treat = 0.1 + 0.8 * x;
        let noise: f64 = rng.gen_range(-1.0..1.0);
        if rng.gen::<f64>() < p_treat {
            propensity.push(p_treat);
            treatment.push(1);
            outcome.push(x + 0.5 + noise);
        } else {
            propensity.push(1.0 - p_treat);
            treatment.push(0);
            outcome.push(x + noise);
        }
    }

    (propensity, treatment, outcome)
}

// random_policies
//
// Generates `n_policies` uniformly random binary policies.
pub(crate) fn random_policies(n_samples: usize, n_policies: usize) -> Vec<Vec<usize>> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..n_policies)
        .map(|_| (0..n_samples).map(|_| rng.gen_range(0..2)).collect())
        .collect()
}
