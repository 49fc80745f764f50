//! Error taxonomy: one enum per subsystem, wrapped by [`QuadrankError`].

pub mod calibration_error;
pub mod config_error;
pub mod error_code;
pub mod evaluation_error;
pub mod input_error;
pub mod sampling_error;
pub mod scoring_error;

pub use calibration_error::CalibrationError;
pub use config_error::ConfigError;
pub use error_code::QuadrankErrorCode;
pub use evaluation_error::EvaluationError;
pub use input_error::InputError;
pub use sampling_error::SamplingError;
pub use scoring_error::ScoringError;

/// Crate-wide result alias.
pub type QuadrankResult<T> = Result<T, QuadrankError>;

/// Top-level error for every public quadrank operation.
#[derive(Debug, thiserror::Error)]
pub enum QuadrankError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Sampling(#[from] SamplingError),

    #[error(transparent)]
    Scoring(#[from] ScoringError),

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    #[error(transparent)]
    Calibration(#[from] CalibrationError),
}

impl QuadrankErrorCode for QuadrankError {
    fn error_code(&self) -> &'static str {
        match self {
            QuadrankError::Config(e) => e.error_code(),
            QuadrankError::Input(e) => e.error_code(),
            QuadrankError::Sampling(e) => e.error_code(),
            QuadrankError::Scoring(e) => e.error_code(),
            QuadrankError::Evaluation(e) => e.error_code(),
            QuadrankError::Calibration(e) => e.error_code(),
        }
    }
}
