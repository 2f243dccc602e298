//! Policy Value Estimator (ERUPT)
//!
//! Estimates the mean outcome a *hypothetical* assignment policy would
//! produce, using only data logged under a different, stochastic policy
//! with known propensities.
//!
//! For each unit $i$ with logged treatment $W_i$, logged propensity
//! $p_i = P(W_i | X_i)$, outcome $Y_i$ and recommended action $\pi_i$:
//!
//! $$w_i = \frac{\mathbb{1}[W_i = \pi_i]}{p_i}, \qquad z_i = w_i Y_i$$
//!
//! * **Horvitz-Thompson** (default):
//!   $\hat{V} = \frac{1}{n} \sum_i z_i$, with standard error $\mathrm{sd}(z) / \sqrt{n}$.
//! * **Self-normalized** (Hajek):
//!   $\hat{V} = \sum_i z_i / \sum_i w_i$, with linearized standard error
//!   $\mathrm{sd}(u) \sqrt{n} / \sum_i w_i$, where $u_i = w_i (Y_i - \hat{V})$.
//!
//! Only the logging propensity of the realized action is needed, so the
//! evaluated policy can be any black-box rule supplying one action per unit.
use crate::causal::diagnostics::{arm_support, effective_sample_size, ArmSupport};
use crate::config::{EstimatorConfig, Normalization};
use crate::constants::{LOW_ESS_FRACTION, TWO_SIGMA};
use crate::data::{validate_arms, LoggedSample};
use crate::errors::EruptError;
use crate::utils::{fast_sum, sample_std};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Estimated value of a hypothetical policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyValue {
    /// Point estimate of the policy's mean outcome.
    pub estimate: f64,
    /// Standard error of the point estimate.
    pub standard_error: f64,
    /// Number of logged units.
    pub n_units: usize,
    /// Units whose logged treatment equals the policy's recommendation.
    pub n_matched: usize,
    /// Matched units whose propensity was raised to the configured floor.
    pub n_clipped: usize,
    /// Kish effective sample size of the importance weights.
    pub effective_sample_size: f64,
    /// Per-arm overlap between policy and logged treatment.
    pub arm_support: Vec<ArmSupport>,
}

impl PolicyValue {
    /// Normal-approximation interval `estimate ± z * standard_error`.
    pub fn confidence_interval(&self, z: f64) -> (f64, f64) {
        (
            self.estimate - z * self.standard_error,
            self.estimate + z * self.standard_error,
        )
    }

    /// Approximate 95% interval, `estimate ± 2 * standard_error`.
    pub fn two_sigma_interval(&self) -> (f64, f64) {
        self.confidence_interval(TWO_SIGMA)
    }

    /// Dump the result as a json object.
    pub fn json_dump(&self) -> Result<String, EruptError> {
        serde_json::to_string(self).map_err(|e| EruptError::UnableToWrite(e.to_string()))
    }
}

/// Inverse-propensity-weighted estimator of policy values.
///
/// Holds no state between calls besides its configuration; a single
/// estimator can evaluate any number of policies, including concurrently.
#[derive(Debug, Clone, Default)]
pub struct PolicyValueEstimator {
    pub cfg: EstimatorConfig,
}

impl PolicyValueEstimator {
    /// Create a new estimator, validating the configuration.
    pub fn new(cfg: EstimatorConfig) -> Result<Self, EruptError> {
        cfg.validate()?;
        Ok(PolicyValueEstimator { cfg })
    }

    /// Estimate the mean outcome of `policy` on the logged sample.
    ///
    /// * `sample` - Data logged under the logging policy.
    /// * `policy` - Action the hypothetical policy assigns to each unit.
    pub fn estimate(&self, sample: &LoggedSample, policy: &[usize]) -> Result<PolicyValue, EruptError> {
        let n = sample.len();
        if n == 0 {
            return Err(EruptError::EmptySample);
        }
        if policy.len() != n {
            return Err(EruptError::LengthMismatch(
                "hypothetical_policy".to_string(),
                policy.len(),
                n,
            ));
        }
        if let Some(n_arms) = self.cfg.n_arms {
            validate_arms(sample.treatment(), "actual_treatment", n_arms)?;
            validate_arms(policy, "hypothetical_policy", n_arms)?;
        }

        let (weights, n_matched, n_clipped) = self.importance_weights(sample, policy)?;
        if n_matched == 0 {
            return Err(EruptError::NoSupport(n));
        }
        if n < 2 {
            return Err(EruptError::InsufficientSample(n));
        }
        // Self-normalized residuals vanish with a single matched unit.
        if self.cfg.normalization == Normalization::SelfNormalized && n_matched < 2 {
            return Err(EruptError::InsufficientSample(n_matched));
        }
        if n_clipped > 0 {
            if let Some(floor) = self.cfg.propensity_floor {
                warn!(
                    "Clipped the propensity of {} of {} matched units to {}, the estimate is no longer unbiased.",
                    n_clipped, n_matched, floor
                );
            }
        }

        let outcome = sample.outcome();
        let terms: Vec<f64> = weights.iter().zip(outcome.iter()).map(|(w, y)| w * y).collect();
        if let Some(i) = terms.iter().position(|z| !z.is_finite()) {
            return Err(EruptError::NonFiniteEstimate(format!("weighted outcome of unit {}", i)));
        }
        let n_f = n as f64;

        let (estimate, standard_error) = match self.cfg.normalization {
            Normalization::HorvitzThompson => {
                let mean = fast_sum(&terms) / n_f;
                (mean, sample_std(&terms, mean) / n_f.sqrt())
            }
            Normalization::SelfNormalized => {
                let total_weight = fast_sum(&weights);
                let mean = fast_sum(&terms) / total_weight;
                // Residual terms are zero-mean by construction.
                let residuals: Vec<f64> = weights
                    .iter()
                    .zip(outcome.iter())
                    .map(|(w, y)| w * (y - mean))
                    .collect();
                (mean, sample_std(&residuals, 0.0) * n_f.sqrt() / total_weight)
            }
        };
        if !estimate.is_finite() {
            return Err(EruptError::NonFiniteEstimate("estimate".to_string()));
        }
        if !standard_error.is_finite() {
            return Err(EruptError::NonFiniteEstimate("standard error".to_string()));
        }

        let n_arms = self.cfg.n_arms.unwrap_or_else(|| sample.observed_arms());
        let ess = effective_sample_size(&weights);
        if ess < LOW_ESS_FRACTION * n_matched as f64 {
            warn!(
                "Effective sample size {:.1} is small compared to the {} matched units, the standard error may be unreliable.",
                ess, n_matched
            );
        }
        debug!(
            "Policy value over {} units ({} matched): estimate {:.6}, standard error {:.6}.",
            n, n_matched, estimate, standard_error
        );

        Ok(PolicyValue {
            estimate,
            standard_error,
            n_units: n,
            n_matched,
            n_clipped,
            effective_sample_size: ess,
            arm_support: arm_support(sample.treatment(), policy, n_arms),
        })
    }

    /// Per-unit importance weights `match_i / propensity_i`, along with the
    /// number of matched and clipped units.
    ///
    /// Unmatched units get weight 0 whatever their propensity. A matched unit
    /// logged with propensity 0 is an impossible state and is rejected, even
    /// when a floor is configured, as is a weight that overflows.
    pub fn importance_weights(
        &self,
        sample: &LoggedSample,
        policy: &[usize],
    ) -> Result<(Vec<f64>, usize, usize), EruptError> {
        if policy.len() != sample.len() {
            return Err(EruptError::LengthMismatch(
                "hypothetical_policy".to_string(),
                policy.len(),
                sample.len(),
            ));
        }
        let mut weights = Vec::with_capacity(sample.len());
        let mut n_matched = 0;
        let mut n_clipped = 0;

        for (i, ((t, p), a)) in sample
            .treatment()
            .iter()
            .zip(sample.propensity().iter())
            .zip(policy.iter())
            .enumerate()
        {
            if t != a {
                weights.push(0.0);
                continue;
            }
            if *p == 0.0 {
                return Err(EruptError::ZeroPropensityMatch(i));
            }
            n_matched += 1;
            let p = match self.cfg.propensity_floor {
                Some(floor) if *p < floor => {
                    n_clipped += 1;
                    floor
                }
                _ => *p,
            };
            let w = 1.0 / p;
            if !w.is_finite() {
                return Err(EruptError::NonFiniteWeight(i));
            }
            weights.push(w);
        }
        Ok((weights, n_matched, n_clipped))
    }
}

/// Estimate a hypothetical policy's mean outcome and its standard error from
/// logged data, using the unclipped Horvitz-Thompson estimator.
///
/// * `actual_propensity` - Logging probability of each unit's realized treatment.
/// * `actual_treatment` - Treatment each unit actually received.
/// * `actual_outcome` - Observed outcome of each unit.
/// * `hypothetical_policy` - Treatment the evaluated policy assigns to each unit.
pub fn estimate(
    actual_propensity: &[f64],
    actual_treatment: &[usize],
    actual_outcome: &[f64],
    hypothetical_policy: &[usize],
) -> Result<(f64, f64), EruptError> {
    let sample = LoggedSample::new(actual_propensity, actual_treatment, actual_outcome)?;
    let value = PolicyValueEstimator::default().estimate(&sample, hypothetical_policy)?;
    Ok((value.estimate, value.standard_error))
}
