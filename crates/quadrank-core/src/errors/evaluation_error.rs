use super::error_code::{self, QuadrankErrorCode};

/// Average Precision / MAP errors.
#[derive(Debug, thiserror::Error)]
pub enum EvaluationError {
    #[error("query {query_id} has no ground-truth relevant documents")]
    NoGroundTruth { query_id: String },

    #[error("none of the {queries} rankings has ground truth")]
    NoEvaluableQueries { queries: usize },
}

impl QuadrankErrorCode for EvaluationError {
    fn error_code(&self) -> &'static str {
        match self {
            EvaluationError::NoGroundTruth { .. } => error_code::NO_GROUND_TRUTH,
            EvaluationError::NoEvaluableQueries { .. } => error_code::NO_EVALUABLE_QUERIES,
        }
    }
}
