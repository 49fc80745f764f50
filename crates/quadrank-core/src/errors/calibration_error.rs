use super::error_code::{self, QuadrankErrorCode};

/// Alpha grid-search errors.
#[derive(Debug, thiserror::Error)]
pub enum CalibrationError {
    #[error("invalid alpha grid: start={start}, stop={stop}, step={step}")]
    InvalidGrid { start: f64, stop: f64, step: f64 },

    #[error("every alpha in the grid failed ({attempted} attempted); last error: {last_error}")]
    AllAlphasFailed { attempted: usize, last_error: String },
}

impl QuadrankErrorCode for CalibrationError {
    fn error_code(&self) -> &'static str {
        match self {
            CalibrationError::InvalidGrid { .. } => error_code::INVALID_GRID,
            CalibrationError::AllAlphasFailed { .. } => error_code::ALL_ALPHAS_FAILED,
        }
    }
}
