use super::error_code::{self, QuadrankErrorCode};

/// Quadruple construction errors.
#[derive(Debug, thiserror::Error)]
pub enum SamplingError {
    #[error("query {query_id} has no positive documents")]
    NoPositives { query_id: String },

    #[error("query {query_id}: need {needed} negatives, only {available} eligible")]
    InsufficientNegatives {
        query_id: String,
        needed: usize,
        available: usize,
    },
}

impl QuadrankErrorCode for SamplingError {
    fn error_code(&self) -> &'static str {
        match self {
            SamplingError::NoPositives { .. } => error_code::NO_POSITIVES,
            SamplingError::InsufficientNegatives { .. } => error_code::INSUFFICIENT_NEGATIVES,
        }
    }
}
