//! Pipeline configuration, loaded from TOML.
//!
//! Every section is `#[serde(default)]`, so an empty document yields the
//! defaults in [`defaults`].

pub mod calibration_config;
pub mod defaults;
pub mod observability_config;
pub mod sampling_config;
pub mod scoring_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use calibration_config::CalibrationConfig;
pub use observability_config::ObservabilityConfig;
pub use sampling_config::SamplingConfig;
pub use scoring_config::{DuplicatePolicy, PriorNormalization, ScoringConfig};

use crate::constants::MAX_GRID_POINTS;
use crate::errors::{ConfigError, QuadrankResult};

/// Top-level configuration for a pipeline run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadrankConfig {
    pub sampling: SamplingConfig,
    pub scoring: ScoringConfig,
    pub calibration: CalibrationConfig,
    pub observability: ObservabilityConfig,
}

impl QuadrankConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(content: &str) -> QuadrankResult<Self> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_file(path: &Path) -> QuadrankResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| {
            let path = path.display().to_string();
            if source.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound { path }
            } else {
                ConfigError::ReadError { path, source }
            }
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> QuadrankResult<()> {
        let cal = &self.calibration;
        if !cal.step.is_finite() || cal.step <= 0.0 {
            return Err(invalid("calibration.step", format!("must be > 0, got {}", cal.step)));
        }
        if !cal.start.is_finite() || !cal.stop.is_finite() || cal.stop < cal.start {
            return Err(invalid(
                "calibration.stop",
                format!("must be >= start ({}), got {}", cal.start, cal.stop),
            ));
        }
        let points = (cal.stop - cal.start) / cal.step;
        if points > MAX_GRID_POINTS as f64 {
            return Err(invalid(
                "calibration.step",
                format!("grid would have {points:.0} points, limit is {MAX_GRID_POINTS}"),
            ));
        }

        let fraction = self.sampling.validation_fraction;
        if !(0.0..1.0).contains(&fraction) {
            return Err(invalid(
                "sampling.validation_fraction",
                format!("must be in [0, 1), got {fraction}"),
            ));
        }
        if self.sampling.hard_negative_ratio == 0 {
            return Err(invalid("sampling.hard_negative_ratio", "must be >= 1".to_string()));
        }

        let floor = self.scoring.probability_floor;
        if !floor.is_finite() || floor <= 0.0 || floor >= 1.0 {
            return Err(invalid(
                "scoring.probability_floor",
                format!("must be in (0, 1), got {floor}"),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &str, message: String) -> crate::errors::QuadrankError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message,
    }
    .into()
}
