use serde::{Deserialize, Serialize};

use super::defaults;

/// Alpha grid-search configuration.
///
/// The grid is `start + step, start + 2·step, …, stop` (stop inclusive),
/// i.e. `floor((stop - start) / step)` points.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
    /// Evaluate grid points on the rayon pool.
    pub parallel: bool,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            start: defaults::DEFAULT_ALPHA_START,
            stop: defaults::DEFAULT_ALPHA_STOP,
            step: defaults::DEFAULT_ALPHA_STEP,
            parallel: defaults::DEFAULT_PARALLEL_CALIBRATION,
        }
    }
}
