use serde::{Deserialize, Serialize};

use super::QueryId;
use crate::errors::{QuadrankError, QuadrankErrorCode};

/// A query that a batch stage could not process, kept for the run report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryFailure {
    pub query_id: QueryId,
    pub stage: String,
    pub code: String,
    pub message: String,
}

impl QueryFailure {
    pub fn new(query_id: impl Into<QueryId>, stage: &str, error: &QuadrankError) -> Self {
        Self {
            query_id: query_id.into(),
            stage: stage.to_string(),
            code: error.error_code().to_string(),
            message: error.to_string(),
        }
    }
}
