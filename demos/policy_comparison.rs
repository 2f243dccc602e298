//! Run two experiments on the same synthetic population, one with a random
//! assignment and one with a targeted policy, then check that the policy
//! value estimated from the first experiment matches what the second one
//! actually observed.
use erupt::{EstimatorConfig, LoggedSample, Normalization, PolicyValueEstimator};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::error::Error;

// Outcome under each arm for a unit with feature `x`.
fn outcome(x: f64, treated: bool) -> f64 {
    if treated {
        1.0 + x + 2.0 * (x - 0.5)
    } else {
        1.0 + x
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let n = 20_000;
    let mut rng = StdRng::seed_from_u64(7);
    let x: Vec<f64> = (0..n).map(|_| rng.gen()).collect();

    // Experiment 1: treatment probability grows with x.
    let mut propensity = Vec::with_capacity(n);
    let mut treatment = Vec::with_capacity(n);
    let mut observed = Vec::with_capacity(n);
    for xi in &x {
        let p_treat = 0.2 + 0.6 * xi;
        let noise: f64 = rng.gen_range(-0.5..0.5);
        let treated = rng.gen::<f64>() < p_treat;
        propensity.push(if treated { p_treat } else { 1.0 - p_treat });
        treatment.push(usize::from(treated));
        observed.push(outcome(*xi, treated) + noise);
    }
    let sample = LoggedSample::new(&propensity, &treatment, &observed)?;

    // Experiment 2: treat exactly the units that benefit.
    let targeted: Vec<usize> = x.iter().map(|xi| usize::from(*xi > 0.5)).collect();
    let targeted_mean = x
        .iter()
        .zip(targeted.iter())
        .map(|(xi, a)| outcome(*xi, *a == 1) + rng.gen_range(-0.5..0.5))
        .sum::<f64>()
        / n as f64;

    let treat_all = vec![1; n];
    let treat_none = vec![0; n];
    let policies = vec![targeted, treat_all, treat_none];
    let names = ["targeted", "treat all", "treat none"];

    println!("Logged mean under experiment 1: {:.4}", sample.logged_mean().unwrap_or(f64::NAN));
    println!("Observed mean under experiment 2 (targeted): {:.4}", targeted_mean);

    for normalization in [Normalization::HorvitzThompson, Normalization::SelfNormalized] {
        let estimator = PolicyValueEstimator::new(EstimatorConfig::default().set_normalization(normalization))?;
        println!("{:?}", normalization);
        for (name, result) in names.iter().zip(estimator.evaluate_policies(&sample, &policies)?) {
            let value = result?;
            let (lower, upper) = value.two_sigma_interval();
            println!(
                "  {:<10} estimate {:.4} ± {:.4} [{:.4}, {:.4}], matched {}, ess {:.0}",
                name,
                value.estimate,
                2.0 * value.standard_error,
                lower,
                upper,
                value.n_matched,
                value.effective_sample_size
            );
        }
    }

    Ok(())
}
