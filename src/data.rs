//! Data
//!
//! Borrowed, validated views over logged experiment data.
use crate::errors::EruptError;

/// Logged experiment data: one entry per unit in each of the three
/// aligned slices.
///
/// Construction validates shape and domain, so an estimator holding a
/// `LoggedSample` only has to check the policy it evaluates.
#[derive(Debug, Clone, Copy)]
pub struct LoggedSample<'a> {
    propensity: &'a [f64],
    treatment: &'a [usize],
    outcome: &'a [f64],
}

impl<'a> LoggedSample<'a> {
    /// Create a new logged sample.
    ///
    /// * `propensity` - Probability the logging policy assigned each unit its realized treatment.
    /// * `treatment` - Treatment actually assigned, as an arm code.
    /// * `outcome` - Observed outcome under the realized treatment.
    ///
    /// Propensities must lie in [0, 1]. A zero propensity is accepted here
    /// and only rejected when the unit matches an evaluated policy.
    pub fn new(propensity: &'a [f64], treatment: &'a [usize], outcome: &'a [f64]) -> Result<Self, EruptError> {
        let n = treatment.len();
        if propensity.len() != n {
            return Err(EruptError::LengthMismatch(
                "actual_propensity".to_string(),
                propensity.len(),
                n,
            ));
        }
        if outcome.len() != n {
            return Err(EruptError::LengthMismatch("actual_outcome".to_string(), outcome.len(), n));
        }
        if let Some((i, p)) = propensity
            .iter()
            .enumerate()
            .find(|(_, p)| p.is_nan() || **p < 0.0 || **p > 1.0)
        {
            return Err(EruptError::InvalidPropensity(i, *p));
        }
        if let Some((i, y)) = outcome.iter().enumerate().find(|(_, y)| !y.is_finite()) {
            return Err(EruptError::InvalidOutcome(i, *y));
        }
        Ok(LoggedSample {
            propensity,
            treatment,
            outcome,
        })
    }

    /// Number of logged units.
    pub fn len(&self) -> usize {
        self.treatment.len()
    }

    pub fn is_empty(&self) -> bool {
        self.treatment.is_empty()
    }

    pub fn propensity(&self) -> &'a [f64] {
        self.propensity
    }

    pub fn treatment(&self) -> &'a [usize] {
        self.treatment
    }

    pub fn outcome(&self) -> &'a [f64] {
        self.outcome
    }

    /// Number of arms implied by the observed codes, `max(code) + 1`.
    pub fn observed_arms(&self) -> usize {
        self.treatment.iter().max().map_or(0, |m| m + 1)
    }

    /// Mean outcome actually observed under the logging policy.
    pub fn logged_mean(&self) -> Option<f64> {
        if self.is_empty() {
            None
        } else {
            Some(self.outcome.iter().sum::<f64>() / self.len() as f64)
        }
    }
}

/// Convert float-coded treatments, as they come out of a data frame, into arm codes.
///
/// * `values` - Treatment or policy column.
/// * `name` - Name of the column, used in errors.
pub fn treatment_codes(values: &[f64], name: &str) -> Result<Vec<usize>, EruptError> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            if v.is_finite() && *v >= 0.0 && v.fract() == 0.0 && *v <= usize::MAX as f64 {
                Ok(*v as usize)
            } else {
                Err(EruptError::InvalidTreatment(
                    i,
                    name.to_string(),
                    v.to_string(),
                    "a non-negative integer".to_string(),
                ))
            }
        })
        .collect()
}

/// Check every code lies in `0..n_arms`.
pub(crate) fn validate_arms(codes: &[usize], name: &str, n_arms: usize) -> Result<(), EruptError> {
    match codes.iter().enumerate().find(|(_, c)| **c >= n_arms) {
        Some((i, c)) => Err(EruptError::InvalidTreatment(
            i,
            name.to_string(),
            c.to_string(),
            format!("an arm in 0..{}", n_arms),
        )),
        None => Ok(()),
    }
}
