// Modules
pub mod causal;
pub mod config;
pub mod constants;
pub mod data;
pub mod errors;
pub mod utils;

// Individual classes, and functions
pub use causal::erupt::{estimate, PolicyValue, PolicyValueEstimator};
pub use config::{EstimatorConfig, Normalization};
pub use data::{treatment_codes, LoggedSample};
pub use errors::EruptError;
