use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{DocId, QueryId};

/// Classifier output per document for one query, before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawScoreSet {
    pub query_id: QueryId,
    pub scores: BTreeMap<DocId, f64>,
}

/// A probability distribution over one query's documents.
///
/// Keys iterate in ascending document id, which fixes the order every
/// downstream computation sees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedScoreSet {
    pub query_id: QueryId,
    pub probabilities: BTreeMap<DocId, f64>,
}

impl NormalizedScoreSet {
    /// Wrap values the caller already knows to be a distribution.
    pub fn from_probabilities<I, S>(query_id: impl Into<QueryId>, probabilities: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<DocId>,
    {
        Self {
            query_id: query_id.into(),
            probabilities: probabilities
                .into_iter()
                .map(|(d, p)| (d.into(), p))
                .collect(),
        }
    }

    pub fn get(&self, doc: &str) -> Option<f64> {
        self.probabilities.get(doc).copied()
    }

    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.probabilities.values().sum()
    }
}

/// Log-linear fused scores for one query at one alpha.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusedScoreSet {
    pub query_id: QueryId,
    pub alpha: f64,
    pub scores: BTreeMap<DocId, f64>,
}
