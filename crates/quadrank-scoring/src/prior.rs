//! First-stage prior → probability distribution.

use quadrank_core::config::PriorNormalization;
use quadrank_core::constants::DISTRIBUTION_TOLERANCE;
use quadrank_core::errors::{QuadrankResult, ScoringError};
use quadrank_core::models::{CandidatePool, DocId, NormalizedScoreSet};

use crate::softmax::softmax;

/// True when every value lies in [0, 1] and they sum to 1.
pub fn is_distribution(values: &[f64]) -> bool {
    !values.is_empty()
        && values.iter().all(|v| (0.0..=1.0).contains(v))
        && (values.iter().sum::<f64>() - 1.0).abs() <= DISTRIBUTION_TOLERANCE
}

/// Normalize a candidate pool's priors according to `mode`.
pub fn prior_distribution(
    query_id: &str,
    pool: &CandidatePool,
    mode: PriorNormalization,
) -> QuadrankResult<NormalizedScoreSet> {
    if pool.is_empty() {
        return Err(ScoringError::EmptyScoreSet {
            query_id: query_id.to_string(),
        }
        .into());
    }

    let mut entries: Vec<(&DocId, f64)> = pool.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    if let Some((doc, value)) = entries.iter().find(|(_, v)| !v.is_finite()) {
        return Err(ScoringError::NonFiniteScore {
            query_id: query_id.to_string(),
            doc_id: doc.to_string(),
            value: *value,
        }
        .into());
    }

    let values: Vec<f64> = entries.iter().map(|(_, v)| *v).collect();
    let use_softmax = match mode {
        PriorNormalization::Softmax => true,
        PriorNormalization::AsIs => false,
        PriorNormalization::Auto => !is_distribution(&values),
    };
    let probabilities = if use_softmax { softmax(&values) } else { values };

    Ok(NormalizedScoreSet {
        query_id: query_id.to_string(),
        probabilities: entries
            .into_iter()
            .map(|(d, _)| d.clone())
            .zip(probabilities)
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_keeps_existing_distribution() {
        let pool = CandidatePool::from_entries([("d1", 0.6), ("d2", 0.3), ("d3", 0.1)]);
        let prior = prior_distribution("q1", &pool, PriorNormalization::Auto).unwrap();
        assert_eq!(prior.get("d1"), Some(0.6));
        assert_eq!(prior.get("d3"), Some(0.1));
    }

    #[test]
    fn auto_softmaxes_bm25_scores() {
        let pool = CandidatePool::from_entries([("d1", 12.5), ("d2", 11.0), ("d3", 3.2)]);
        let prior = prior_distribution("q1", &pool, PriorNormalization::Auto).unwrap();
        assert!((prior.total() - 1.0).abs() < 1e-12);
        assert!(prior.get("d1").unwrap() > prior.get("d2").unwrap());
    }

    #[test]
    fn forced_softmax_changes_a_distribution() {
        let pool = CandidatePool::from_entries([("d1", 0.6), ("d2", 0.4)]);
        let prior = prior_distribution("q1", &pool, PriorNormalization::Softmax).unwrap();
        assert!((prior.get("d1").unwrap() - 0.6).abs() > 1e-3);
    }

    #[test]
    fn empty_pool_fails() {
        let err = prior_distribution("q2", &CandidatePool::new(), PriorNormalization::Auto)
            .unwrap_err();
        assert!(err.to_string().contains("q2"));
    }

    #[test]
    fn non_finite_prior_fails() {
        let pool = CandidatePool::from_entries([("d1", f64::NAN)]);
        assert!(prior_distribution("q1", &pool, PriorNormalization::AsIs).is_err());
    }
}
