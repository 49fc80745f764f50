use serde::{Deserialize, Serialize};

use super::defaults;

/// Quadruple construction and query-split configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Global seed. `None` derives one from the clock at startup.
    pub seed: Option<u64>,
    /// Pool-to-positive ratio at which negatives are restricted to the
    /// lower-confidence half of the pool.
    pub hard_negative_ratio: usize,
    /// Fraction of training instances held out for validation.
    pub validation_fraction: f64,
    /// Number of training queries drawn for alpha calibration.
    pub calibration_queries: usize,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            seed: None,
            hard_negative_ratio: defaults::DEFAULT_HARD_NEGATIVE_RATIO,
            validation_fraction: defaults::DEFAULT_VALIDATION_FRACTION,
            calibration_queries: defaults::DEFAULT_CALIBRATION_QUERIES,
        }
    }
}
