use super::error_code::{self, QuadrankErrorCode};

/// Aggregation, normalization, and fusion errors.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("query {query_id} has no scored documents")]
    EmptyScoreSet { query_id: String },

    #[error("query {query_id}: document {doc_id} scored in more than one instance")]
    DuplicateDocument { query_id: String, doc_id: String },

    #[error("query {query_id}: non-finite score {value} for document {doc_id}")]
    NonFiniteScore {
        query_id: String,
        doc_id: String,
        value: f64,
    },

    #[error("score sets belong to different queries: {left} vs {right}")]
    QueryMismatch { left: String, right: String },

    #[error("query {query_id}: classifier and prior share no documents")]
    NoOverlap { query_id: String },

    #[error("query {query_id}: classifier failed: {reason}")]
    Classifier { query_id: String, reason: String },
}

impl QuadrankErrorCode for ScoringError {
    fn error_code(&self) -> &'static str {
        match self {
            ScoringError::EmptyScoreSet { .. } => error_code::EMPTY_SCORE_SET,
            ScoringError::DuplicateDocument { .. } => error_code::DUPLICATE_DOCUMENT,
            ScoringError::NonFiniteScore { .. } => error_code::NON_FINITE_SCORE,
            ScoringError::QueryMismatch { .. } => error_code::QUERY_MISMATCH,
            ScoringError::NoOverlap { .. } => error_code::NO_OVERLAP,
            ScoringError::Classifier { .. } => error_code::CLASSIFIER_ERROR,
        }
    }
}
