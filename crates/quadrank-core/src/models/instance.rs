use serde::{Deserialize, Serialize};

use super::{DocId, QueryId};
use crate::constants::QUADRUPLE_WIDTH;

/// One multiple-choice unit shown to the classifier: a query and four
/// candidate slots. Inference instances built from an undersized tail group
/// carry `None` in the padding slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    pub query_id: QueryId,
    pub slots: [Option<DocId>; QUADRUPLE_WIDTH],
    /// `slots[i]` holds the candidate that sat at position `permutation[i]`
    /// before shuffling. For training instances position 0 is the positive.
    pub permutation: [usize; QUADRUPLE_WIDTH],
    /// Position of the positive after permutation (training only).
    pub gold: Option<usize>,
}

impl Instance {
    /// Documents in slot order, skipping padding.
    pub fn doc_ids(&self) -> impl Iterator<Item = &DocId> {
        self.slots.iter().flatten()
    }

    /// Number of non-padding slots.
    pub fn filled(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn gold_doc(&self) -> Option<&DocId> {
        self.gold.and_then(|g| self.slots.get(g)).and_then(Option::as_ref)
    }
}

/// An instance together with the classifier's output for each slot.
/// Padding slots carry `None` and never reach aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredInstance {
    pub instance: Instance,
    pub scores: [Option<f64>; QUADRUPLE_WIDTH],
}

impl ScoredInstance {
    /// `(document, raw score)` pairs for every filled, scored slot.
    pub fn pairs(&self) -> impl Iterator<Item = (&DocId, f64)> {
        self.instance
            .slots
            .iter()
            .zip(self.scores.iter())
            .filter_map(|(doc, score)| Some((doc.as_ref()?, (*score)?)))
    }
}
