//! Collapse scored instances into one raw score per (query, document).

use std::collections::BTreeMap;

use quadrank_core::config::DuplicatePolicy;
use quadrank_core::errors::{QuadrankResult, ScoringError};
use quadrank_core::models::{DocId, QueryId, RawScoreSet, ScoredInstance};
use tracing::debug;

/// Fold every `(document, score)` pair of `scored` into a [`RawScoreSet`].
///
/// A document seen in more than one instance is averaged or rejected per
/// `policy`. Padding slots never contribute. Instances for another query,
/// non-finite scores, and an empty result are errors.
pub fn aggregate(
    query_id: &str,
    scored: &[ScoredInstance],
    policy: DuplicatePolicy,
) -> QuadrankResult<RawScoreSet> {
    let mut acc: BTreeMap<DocId, (f64, u32)> = BTreeMap::new();

    for instance in scored {
        if instance.instance.query_id != query_id {
            return Err(ScoringError::QueryMismatch {
                left: query_id.to_string(),
                right: instance.instance.query_id.clone(),
            }
            .into());
        }
        for (doc, score) in instance.pairs() {
            if !score.is_finite() {
                return Err(ScoringError::NonFiniteScore {
                    query_id: query_id.to_string(),
                    doc_id: doc.clone(),
                    value: score,
                }
                .into());
            }
            let entry = acc.entry(doc.clone()).or_insert((0.0, 0));
            if entry.1 > 0 && policy == DuplicatePolicy::Reject {
                return Err(ScoringError::DuplicateDocument {
                    query_id: query_id.to_string(),
                    doc_id: doc.clone(),
                }
                .into());
            }
            entry.0 += score;
            entry.1 += 1;
        }
    }

    if acc.is_empty() {
        return Err(ScoringError::EmptyScoreSet {
            query_id: query_id.to_string(),
        }
        .into());
    }

    let duplicates = acc.values().filter(|(_, n)| *n > 1).count();
    if duplicates > 0 {
        debug!(query_id, duplicates, "averaged repeated documents");
    }

    Ok(RawScoreSet {
        query_id: query_id.to_string(),
        scores: acc
            .into_iter()
            .map(|(doc, (sum, n))| (doc, sum / f64::from(n)))
            .collect(),
    })
}

/// Bucket scored instances by query id, keeping their relative order.
pub fn group_by_query(scored: Vec<ScoredInstance>) -> BTreeMap<QueryId, Vec<ScoredInstance>> {
    let mut groups: BTreeMap<QueryId, Vec<ScoredInstance>> = BTreeMap::new();
    for s in scored {
        groups.entry(s.instance.query_id.clone()).or_default().push(s);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadrank_core::errors::QuadrankErrorCode;
    use quadrank_core::models::Instance;

    fn scored(query: &str, docs: [Option<&str>; 4], scores: [Option<f64>; 4]) -> ScoredInstance {
        ScoredInstance {
            instance: Instance {
                query_id: query.to_string(),
                slots: docs.map(|d| d.map(String::from)),
                permutation: [0, 1, 2, 3],
                gold: None,
            },
            scores,
        }
    }

    #[test]
    fn collects_each_slot() {
        let set = aggregate(
            "q1",
            &[
                scored("q1", [Some("a"), Some("b"), Some("c"), Some("d")], [Some(0.1), Some(0.2), Some(0.3), Some(0.4)]),
                scored("q1", [Some("e"), None, None, None], [Some(0.9), Some(5.0), None, None]),
            ],
            DuplicatePolicy::Average,
        )
        .unwrap();
        assert_eq!(set.scores.len(), 5);
        assert_eq!(set.scores["e"], 0.9);
    }

    #[test]
    fn average_policy_means_repeats() {
        let set = aggregate(
            "q1",
            &[
                scored("q1", [Some("a"), Some("b"), None, None], [Some(1.0), Some(0.0), None, None]),
                scored("q1", [Some("a"), Some("c"), None, None], [Some(3.0), Some(0.0), None, None]),
            ],
            DuplicatePolicy::Average,
        )
        .unwrap();
        assert_eq!(set.scores["a"], 2.0);
    }

    #[test]
    fn reject_policy_fails_on_repeats() {
        let err = aggregate(
            "q1",
            &[
                scored("q1", [Some("a"), None, None, None], [Some(1.0), None, None, None]),
                scored("q1", [Some("a"), None, None, None], [Some(3.0), None, None, None]),
            ],
            DuplicatePolicy::Reject,
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "DUPLICATE_DOCUMENT");
    }

    #[test]
    fn foreign_query_is_rejected() {
        let err = aggregate(
            "q1",
            &[scored("q2", [Some("a"), None, None, None], [Some(1.0), None, None, None])],
            DuplicatePolicy::Average,
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "QUERY_MISMATCH");
    }

    #[test]
    fn empty_input_fails() {
        let err = aggregate("q1", &[], DuplicatePolicy::Average).unwrap_err();
        assert_eq!(err.error_code(), "EMPTY_SCORE_SET");
    }

    #[test]
    fn nan_score_fails() {
        let err = aggregate(
            "q1",
            &[scored("q1", [Some("a"), None, None, None], [Some(f64::NAN), None, None, None])],
            DuplicatePolicy::Average,
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "NON_FINITE_SCORE");
    }

    #[test]
    fn grouping_splits_by_query() {
        let groups = group_by_query(vec![
            scored("q2", [Some("a"), None, None, None], [Some(1.0), None, None, None]),
            scored("q1", [Some("b"), None, None, None], [Some(1.0), None, None, None]),
            scored("q2", [Some("c"), None, None, None], [Some(1.0), None, None, None]),
        ]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups["q2"].len(), 2);
    }
}
