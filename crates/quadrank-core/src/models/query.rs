use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{CandidatePool, DocId, QueryId};

/// A query with its first-stage candidate pool and, for training and
/// calibration queries, its ground-truth relevant set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub id: QueryId,
    pub text: String,
    /// `None` for test queries.
    pub relevant: Option<BTreeSet<DocId>>,
    pub pool: CandidatePool,
}

impl Query {
    /// A query without ground truth.
    pub fn new(id: impl Into<QueryId>, text: impl Into<String>, pool: CandidatePool) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            relevant: None,
            pool,
        }
    }

    /// Attach the relevant-document set.
    pub fn with_relevant<I, S>(mut self, relevant: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<DocId>,
    {
        self.relevant = Some(relevant.into_iter().map(Into::into).collect());
        self
    }

    /// True when a non-empty relevant set is known.
    pub fn has_ground_truth(&self) -> bool {
        self.relevant.as_ref().is_some_and(|r| !r.is_empty())
    }
}
