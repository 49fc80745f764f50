use std::collections::BTreeSet;

use quadrank_core::errors::{EvaluationError, QuadrankResult};
use quadrank_core::models::{DocId, Ranking};

/// Average Precision of one ranking against a binary relevant set.
///
/// Precision is recorded at every rank holding a relevant document and the
/// sum is divided by `|relevant|`, so relevant documents that never appear
/// count as zero. A relevant document repeated in the ranking counts at its
/// first position only. An empty relevant set has no defined AP and is an
/// error.
pub fn average_precision(ranking: &Ranking, relevant: &BTreeSet<DocId>) -> QuadrankResult<f64> {
    if relevant.is_empty() {
        return Err(EvaluationError::NoGroundTruth {
            query_id: ranking.query_id.clone(),
        }
        .into());
    }

    let mut found: BTreeSet<&DocId> = BTreeSet::new();
    let mut hits = 0usize;
    let mut precision_sum = 0.0;
    for (position, doc) in ranking.docs.iter().enumerate() {
        if relevant.contains(doc) && found.insert(doc) {
            hits += 1;
            precision_sum += hits as f64 / (position + 1) as f64;
        }
    }
    Ok(precision_sum / relevant.len() as f64)
}
