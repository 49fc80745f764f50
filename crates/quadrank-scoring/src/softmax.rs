use quadrank_core::errors::{QuadrankResult, ScoringError};
use quadrank_core::models::{NormalizedScoreSet, RawScoreSet};

/// Numerically stable softmax: the maximum is subtracted before `exp`.
pub fn softmax(values: &[f64]) -> Vec<f64> {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = values.iter().map(|v| (v - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

/// Turn one query's raw classifier scores into a distribution.
///
/// Scores are taken in ascending document id, so the result does not depend
/// on how the raw set was assembled.
pub fn normalize(raw: &RawScoreSet) -> QuadrankResult<NormalizedScoreSet> {
    if raw.scores.is_empty() {
        return Err(ScoringError::EmptyScoreSet {
            query_id: raw.query_id.clone(),
        }
        .into());
    }
    let values: Vec<f64> = raw.scores.values().copied().collect();
    let probabilities = raw.scores.keys().cloned().zip(softmax(&values)).collect();
    Ok(NormalizedScoreSet {
        query_id: raw.query_id.clone(),
        probabilities,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn softmax_handles_large_logits() {
        let probs = softmax(&[1000.0, 1000.0, 999.0]);
        assert!(probs.iter().all(|p| p.is_finite()));
        assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!((probs[0] - probs[1]).abs() < 1e-15);
    }

    #[test]
    fn softmax_of_empty_is_empty() {
        assert!(softmax(&[]).is_empty());
    }

    #[test]
    fn normalize_empty_fails() {
        let raw = RawScoreSet {
            query_id: "q3".into(),
            scores: BTreeMap::new(),
        };
        let err = normalize(&raw).unwrap_err();
        assert!(err.to_string().contains("q3"));
    }

    #[test]
    fn normalize_preserves_order_of_scores() {
        let raw = RawScoreSet {
            query_id: "q1".into(),
            scores: [("a".to_string(), 2.0), ("b".to_string(), 0.0), ("c".to_string(), 1.0)]
                .into_iter()
                .collect(),
        };
        let norm = normalize(&raw).unwrap();
        assert!(norm.get("a").unwrap() > norm.get("c").unwrap());
        assert!(norm.get("c").unwrap() > norm.get("b").unwrap());
        assert!((norm.total() - 1.0).abs() < 1e-12);
    }
}
