//! Batch Evaluation
//!
//! Evaluates many candidate policies against the same logged sample.
//! Every evaluation only reads the shared sample, so they run in parallel
//! without coordination.
use crate::causal::erupt::{PolicyValue, PolicyValueEstimator};
use crate::data::LoggedSample;
use crate::errors::EruptError;
use log::info;
use rayon::prelude::*;
use std::time::Instant;

impl PolicyValueEstimator {
    /// Estimate the value of each policy in `policies`.
    ///
    /// Results are returned in the order of `policies`. A policy that fails
    /// validation yields its own error without affecting the others; the
    /// outer `Result` only fails if the thread pool cannot be built.
    ///
    /// * `sample` - Data logged under the logging policy.
    /// * `policies` - Candidate policies, one action per unit each.
    pub fn evaluate_policies<P>(
        &self,
        sample: &LoggedSample,
        policies: &[P],
    ) -> Result<Vec<Result<PolicyValue, EruptError>>, EruptError>
    where
        P: AsRef<[usize]> + Sync,
    {
        let start = Instant::now();

        let num_threads = match self.cfg.num_threads {
            Some(num_threads) => num_threads,
            None => std::thread::available_parallelism().map_or(1, |n| n.get()),
        };
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()
            .map_err(|e| EruptError::ThreadPool(e.to_string()))?;

        let results: Vec<Result<PolicyValue, EruptError>> = pool.install(|| {
            policies
                .par_iter()
                .map(|policy| self.estimate(sample, policy.as_ref()))
                .collect()
        });

        info!(
            "Evaluated {} policies on {} units with {} threads in {:.3} seconds.",
            policies.len(),
            sample.len(),
            num_threads,
            start.elapsed().as_secs_f32()
        );

        Ok(results)
    }
}
