//! Causal
//!
//! This module implements off-policy evaluation: estimating the mean outcome
//! of a hypothetical treatment-assignment policy from data logged under a
//! different, stochastic policy with known propensities.
pub mod batch;
pub mod diagnostics;
pub mod erupt;
