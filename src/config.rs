//! Estimator Configuration
//!
//! Defines the configuration structure and enums used by the policy-value
//! estimator. Every knob that changes the estimate away from the raw
//! inverse-propensity-weighted mean is off by default.
use crate::errors::EruptError;
use crate::utils::{items_to_strings, validate_probability_parameter};
use serde::{Deserialize, Serialize};
use std::fs;
use std::str::FromStr;

/// How the importance-weighted outcomes are averaged.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Normalization {
    /// Divide the weighted outcome total by the number of units.
    /// Unbiased under correct propensities.
    #[default]
    HorvitzThompson,
    /// Divide the weighted outcome total by the total weight (Hajek estimator).
    /// Slightly biased, but invariant to outcome shifts and lower variance.
    SelfNormalized,
}

impl FromStr for Normalization {
    type Err = EruptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HorvitzThompson" => Ok(Normalization::HorvitzThompson),
            "SelfNormalized" => Ok(Normalization::SelfNormalized),
            _ => Err(EruptError::InvalidParameter(
                "normalization".to_string(),
                items_to_strings(vec!["HorvitzThompson", "SelfNormalized"]),
                s.to_string(),
            )),
        }
    }
}

fn default_propensity_floor() -> Option<f64> {
    None
}
fn default_n_arms() -> Option<usize> {
    None
}
fn default_num_threads() -> Option<usize> {
    None
}

/// Configuration for the `PolicyValueEstimator`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    /// Optional lower bound applied to the propensity of matched units,
    /// bounding every importance weight by `1 / propensity_floor`.
    /// Clipping biases the estimate and is never applied unless set.
    #[serde(default = "default_propensity_floor")]
    pub propensity_floor: Option<f64>,
    /// Declared number of treatment arms. When set, every treatment and
    /// policy code must lie in `0..n_arms`.
    #[serde(default = "default_n_arms")]
    pub n_arms: Option<usize>,
    /// Averaging scheme for the weighted outcomes.
    #[serde(default)]
    pub normalization: Normalization,
    /// Number of threads used when evaluating a batch of policies.
    #[serde(default = "default_num_threads")]
    pub num_threads: Option<usize>,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        EstimatorConfig {
            propensity_floor: default_propensity_floor(),
            n_arms: default_n_arms(),
            normalization: Normalization::default(),
            num_threads: default_num_threads(),
        }
    }
}

impl EstimatorConfig {
    /// Check that all parameters hold valid values.
    pub fn validate(&self) -> Result<(), EruptError> {
        if let Some(floor) = self.propensity_floor {
            validate_probability_parameter(floor, "propensity_floor")?;
        }
        if self.n_arms == Some(0) {
            return Err(EruptError::InvalidParameter(
                "n_arms".to_string(),
                "at least 1 arm".to_string(),
                "0".to_string(),
            ));
        }
        if self.num_threads == Some(0) {
            return Err(EruptError::InvalidParameter(
                "num_threads".to_string(),
                "at least 1 thread".to_string(),
                "0".to_string(),
            ));
        }
        Ok(())
    }

    // Set methods for parameters

    /// Set the propensity floor.
    /// * `propensity_floor` - Minimum propensity used for matched units, `None` disables clipping.
    pub fn set_propensity_floor(mut self, propensity_floor: Option<f64>) -> Self {
        self.propensity_floor = propensity_floor;
        self
    }

    /// Set the declared number of arms.
    /// * `n_arms` - Number of treatment arms, `None` accepts any code.
    pub fn set_n_arms(mut self, n_arms: Option<usize>) -> Self {
        self.n_arms = n_arms;
        self
    }

    /// Set the normalization.
    /// * `normalization` - How weighted outcomes are averaged.
    pub fn set_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    /// Set the number of threads for batch evaluation.
    /// * `num_threads` - Number of threads, `None` uses all available cores.
    pub fn set_num_threads(mut self, num_threads: Option<usize>) -> Self {
        self.num_threads = num_threads;
        self
    }

    /// Dump the configuration as a json object.
    pub fn json_dump(&self) -> Result<String, EruptError> {
        serde_json::to_string(self).map_err(|e| EruptError::UnableToWrite(e.to_string()))
    }

    /// Load a configuration from a json string, validating it.
    ///
    /// * `json_str` - String object, which can be serialized to json.
    pub fn from_json(json_str: &str) -> Result<Self, EruptError> {
        let cfg = serde_json::from_str::<EstimatorConfig>(json_str)
            .map_err(|e| EruptError::UnableToRead(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Save the configuration as a json object to a file.
    ///
    /// * `path` - Path to save the configuration.
    pub fn save_config(&self, path: &str) -> Result<(), EruptError> {
        let cfg = self.json_dump()?;
        fs::write(path, cfg).map_err(|e| EruptError::UnableToWrite(e.to_string()))
    }

    /// Load a configuration from a path to a json object.
    ///
    /// * `path` - Path to load the configuration from.
    pub fn load_config(path: &str) -> Result<Self, EruptError> {
        let json_str = fs::read_to_string(path).map_err(|e| EruptError::UnableToRead(e.to_string()))?;
        Self::from_json(&json_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_unclipped() {
        let cfg = EstimatorConfig::default();
        assert_eq!(cfg.propensity_floor, None);
        assert_eq!(cfg.n_arms, None);
        assert_eq!(cfg.normalization, Normalization::HorvitzThompson);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_config_json_round_trip() {
        let cfg = EstimatorConfig::default()
            .set_propensity_floor(Some(0.05))
            .set_n_arms(Some(3))
            .set_normalization(Normalization::SelfNormalized);
        let json = cfg.json_dump().unwrap();
        let loaded = EstimatorConfig::from_json(&json).unwrap();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn test_config_missing_fields_use_defaults() {
        let cfg = EstimatorConfig::from_json(r#"{"n_arms": 2}"#).unwrap();
        assert_eq!(cfg.n_arms, Some(2));
        assert_eq!(cfg.propensity_floor, None);
        assert_eq!(cfg.normalization, Normalization::HorvitzThompson);
    }

    #[test]
    fn test_config_rejects_invalid_values() {
        assert!(EstimatorConfig::default()
            .set_propensity_floor(Some(0.0))
            .validate()
            .is_err());
        assert!(EstimatorConfig::default().set_n_arms(Some(0)).validate().is_err());
        assert!(EstimatorConfig::default().set_num_threads(Some(0)).validate().is_err());
        assert!(matches!(
            EstimatorConfig::from_json(r#"{"propensity_floor": 2.0}"#),
            Err(EruptError::InvalidParameter(..))
        ));
        assert!(matches!(
            EstimatorConfig::from_json("not json"),
            Err(EruptError::UnableToRead(_))
        ));
    }

    #[test]
    fn test_normalization_from_str() {
        assert_eq!(
            "SelfNormalized".parse::<Normalization>().unwrap(),
            Normalization::SelfNormalized
        );
        assert!("Hajek".parse::<Normalization>().is_err());
    }

    #[test]
    fn test_save_and_load_config() {
        let path = std::env::temp_dir().join("erupt_estimator_config.json");
        let path = path.to_str().unwrap();
        let cfg = EstimatorConfig::default().set_num_threads(Some(2));
        cfg.save_config(path).unwrap();
        let loaded = EstimatorConfig::load_config(path).unwrap();
        assert_eq!(cfg, loaded);
        std::fs::remove_file(path).unwrap();
    }
}
