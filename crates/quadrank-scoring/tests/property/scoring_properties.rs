use std::collections::BTreeMap;

use proptest::prelude::*;
use quadrank_core::config::{DuplicatePolicy, PriorNormalization};
use quadrank_core::models::{CandidatePool, Instance, RawScoreSet, ScoredInstance};
use quadrank_scoring::{aggregate, fuse, normalize, prior_distribution, rank};

fn raw_set(scores: &[f64]) -> RawScoreSet {
    RawScoreSet {
        query_id: "q".into(),
        scores: scores
            .iter()
            .enumerate()
            .map(|(i, s)| (format!("d{i:03}"), *s))
            .collect(),
    }
}

// ── Normalized distributions sum to one ─────────────────────────────────

proptest! {
    #[test]
    fn classifier_distribution_sums_to_one(scores in prop::collection::vec(-50.0f64..50.0, 1..200)) {
        let norm = normalize(&raw_set(&scores)).unwrap();
        prop_assert!((norm.total() - 1.0).abs() < 1e-6);
        prop_assert!(norm.probabilities.values().all(|p| *p >= 0.0));
    }

    #[test]
    fn prior_distribution_sums_to_one(priors in prop::collection::vec(0.0f64..40.0, 1..200)) {
        let pool = CandidatePool::from_entries(
            priors.iter().enumerate().map(|(i, p)| (format!("d{i:03}"), *p)),
        );
        let prior = prior_distribution("q", &pool, PriorNormalization::Auto).unwrap();
        prop_assert!((prior.total() - 1.0).abs() < 1e-6);
    }
}

// ── Normalization ignores insertion order ───────────────────────────────

proptest! {
    #[test]
    fn aggregation_is_order_independent(scores in prop::collection::vec(-5.0f64..5.0, 4..40)) {
        let instances: Vec<ScoredInstance> = scores
            .chunks(4)
            .enumerate()
            .map(|(g, chunk)| {
                let mut slots: [Option<String>; 4] = Default::default();
                let mut vals = [None; 4];
                for (i, s) in chunk.iter().enumerate() {
                    slots[i] = Some(format!("d{:03}", g * 4 + i));
                    vals[i] = Some(*s);
                }
                ScoredInstance {
                    instance: Instance {
                        query_id: "q".into(),
                        slots,
                        permutation: [0, 1, 2, 3],
                        gold: None,
                    },
                    scores: vals,
                }
            })
            .collect();
        let mut reversed = instances.clone();
        reversed.reverse();

        let a = normalize(&aggregate("q", &instances, DuplicatePolicy::Reject).unwrap()).unwrap();
        let b = normalize(&aggregate("q", &reversed, DuplicatePolicy::Reject).unwrap()).unwrap();
        prop_assert_eq!(a, b);
    }
}

// ── Rankings are sorted and cover the overlap exactly ───────────────────

proptest! {
    #[test]
    fn ranking_is_descending_permutation(
        cls in prop::collection::vec(-10.0f64..10.0, 1..60),
        alpha in 0.0f64..5.0,
    ) {
        let classifier = normalize(&raw_set(&cls)).unwrap();
        let prior = normalize(&raw_set(&cls.iter().rev().copied().collect::<Vec<_>>())).unwrap();
        let fused = fuse(&classifier, &prior, alpha, 1e-12).unwrap();
        let ranking = rank(&fused);

        prop_assert_eq!(ranking.len(), cls.len());
        let scores: Vec<f64> = ranking.docs.iter().map(|d| fused.scores[d]).collect();
        prop_assert!(scores.windows(2).all(|w| w[0] >= w[1]));
        prop_assert!(scores.iter().all(|s| s.is_finite()));

        let by_id: BTreeMap<&String, usize> = ranking.docs.iter().enumerate().map(|(i, d)| (d, i)).collect();
        prop_assert_eq!(by_id.len(), cls.len());
    }
}
