//! Errors
//!
//! Custom error types used throughout the `erupt` crate.
use thiserror::Error;

/// Errors that can occur while estimating a policy value.
#[derive(Debug, Error)]
pub enum EruptError {
    /// First value is the name of the input, second is its length, third is the expected length.
    #[error("Input {0} has length {1}, but {2} units were logged.")]
    LengthMismatch(String, usize, usize),
    /// Propensity outside of [0, 1], or NaN.
    #[error("Unit {0} has propensity {1}, expected a probability in (0, 1].")]
    InvalidPropensity(usize, f64),
    /// First value is the unit, second the input name, third the code, fourth what was expected.
    #[error("Unit {0} has {1} code {2}, expected {3}.")]
    InvalidTreatment(usize, String, String, String),
    /// Outcome is NaN or infinite.
    #[error("Unit {0} has non-finite outcome {1}.")]
    InvalidOutcome(usize, f64),
    /// A unit received the action the policy recommends with a logged probability of zero.
    #[error("Unit {0} matches the hypothetical policy but was logged with propensity 0.")]
    ZeroPropensityMatch(usize),
    /// No units were provided.
    #[error("The logged sample is empty.")]
    EmptySample,
    /// Importance weight overflows, e.g. a subnormal propensity.
    #[error("Unit {0} has an importance weight that is not finite, consider a propensity floor.")]
    NonFiniteWeight(usize),
    /// A weighted outcome, the estimate or its standard error overflows.
    #[error("The {0} is not finite, weighted outcomes are too large to represent.")]
    NonFiniteEstimate(String),
    /// Too few units to compute a standard error.
    #[error("At least 2 units are needed to compute a standard error, {0} available.")]
    InsufficientSample(usize),
    /// No logged action coincides with the hypothetical policy.
    #[error("None of the {0} logged units received the action recommended by the hypothetical policy.")]
    NoSupport(usize),
    /// First value is the name of the parameter, second is expected, third is what was passed.
    #[error("Invalid parameter value passed for {0}, expected {1} but {2} provided.")]
    InvalidParameter(String, String, String),
    /// Thread pool for batch evaluation could not be created.
    #[error("Unable to build thread pool: {0}")]
    ThreadPool(String),
    /// Unable to write object to file.
    #[error("Unable to write to file: {0}")]
    UnableToWrite(String),
    /// Unable to read object from file.
    #[error("Unable to read from a file {0}")]
    UnableToRead(String),
}
