//! Support Diagnostics
//!
//! Quantities describing how much of the logged sample actually informs
//! an estimate: per-arm overlap between the logged treatment and the
//! evaluated policy, and the effective sample size of the importance weights.
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// Overlap between a policy and the logged data for one arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmSupport {
    /// Arm code.
    pub arm: usize,
    /// Units the policy assigns to this arm.
    pub recommended: usize,
    /// Of those, units that were also logged with this arm.
    pub matched: usize,
}

/// Count, per arm, how many units the policy sends there and how many of
/// them were logged with that same arm. Sorted by arm.
///
/// Every arm in `0..n_arms` is reported, so arms the policy never recommends
/// show up with zero counts; codes at or above `n_arms` are reported too.
pub fn arm_support(treatment: &[usize], policy: &[usize], n_arms: usize) -> Vec<ArmSupport> {
    let mut counts: HashMap<usize, (usize, usize)> = (0..n_arms).map(|arm| (arm, (0, 0))).collect();
    for (t, p) in treatment.iter().zip(policy.iter()) {
        let entry = counts.entry(*p).or_insert((0, 0));
        entry.0 += 1;
        if t == p {
            entry.1 += 1;
        }
    }
    let mut support: Vec<ArmSupport> = counts
        .into_iter()
        .map(|(arm, (recommended, matched))| ArmSupport {
            arm,
            recommended,
            matched,
        })
        .collect();
    support.sort_by_key(|s| s.arm);
    support
}

/// Kish effective sample size of a set of importance weights, `(Σw)² / Σw²`.
///
/// Equals the number of non-zero weights when they are all equal, and
/// shrinks as weight concentrates on few units. Zero when all weights are zero.
pub fn effective_sample_size(weights: &[f64]) -> f64 {
    // Scale by the largest weight so the squares cannot overflow.
    let max_w = weights.iter().fold(0.0_f64, |m, w| m.max(w.abs()));
    if max_w == 0.0 || !max_w.is_finite() {
        return 0.0;
    }
    let sum_w: f64 = weights.iter().map(|w| w / max_w).sum();
    let sum_w2: f64 = weights.iter().map(|w| (w / max_w) * (w / max_w)).sum();
    (sum_w * sum_w) / sum_w2
}
