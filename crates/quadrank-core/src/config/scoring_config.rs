use serde::{Deserialize, Serialize};

use super::defaults;

/// What the aggregator does when a document is scored more than once
/// for the same query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Arithmetic mean of every raw score seen for the document.
    #[default]
    Average,
    /// Fail the query with a duplicate-document error.
    Reject,
}

/// How candidate-pool prior scores become a probability distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorNormalization {
    /// Keep the scores when they already form a distribution, softmax otherwise.
    #[default]
    Auto,
    /// Always softmax.
    Softmax,
    /// Use the scores unchanged.
    AsIs,
}

/// Score aggregation and fusion configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub duplicate_policy: DuplicatePolicy,
    pub prior_normalization: PriorNormalization,
    /// Probabilities are clamped up to this value before `log2`.
    pub probability_floor: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::default(),
            prior_normalization: PriorNormalization::default(),
            probability_floor: defaults::DEFAULT_PROBABILITY_FLOOR,
        }
    }
}
