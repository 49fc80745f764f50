//! Property tests for AP, MAP and the alpha search.

use std::collections::BTreeSet;

use proptest::prelude::*;
use quadrank_core::models::{NormalizedScoreSet, Ranking};
use quadrank_eval::{average_precision, search, AlphaGrid, CalibrationQuery};

fn docs(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("d{i:03}")).collect()
}

proptest! {
    #[test]
    fn ap_is_within_unit_interval(n in 1usize..40, picks in prop::collection::vec(any::<prop::sample::Index>(), 1..10)) {
        let docs = docs(n);
        let relevant: BTreeSet<String> = picks.iter().map(|i| docs[i.index(n)].clone()).collect();
        let ap = average_precision(&Ranking::new("q", docs), &relevant).unwrap();
        prop_assert!((0.0..=1.0).contains(&ap));
    }

    #[test]
    fn relevant_prefix_gives_perfect_ap(n in 1usize..40, k in 1usize..40) {
        let k = k.min(n);
        let docs = docs(n);
        let relevant: BTreeSet<String> = docs[..k].iter().cloned().collect();
        let ap = average_precision(&Ranking::new("q", docs), &relevant).unwrap();
        prop_assert!((ap - 1.0).abs() < 1e-12);
    }

    #[test]
    fn relevant_suffix_matches_closed_form(n in 1usize..40, k in 1usize..40) {
        let k = k.min(n);
        let docs = docs(n);
        let relevant: BTreeSet<String> = docs[n - k..].iter().cloned().collect();
        let ap = average_precision(&Ranking::new("q", docs), &relevant).unwrap();
        let expected = (1..=k).map(|i| i as f64 / (n - k + i) as f64).sum::<f64>() / k as f64;
        prop_assert!((ap - expected).abs() < 1e-12);
    }

    #[test]
    fn grid_points_stay_inside_bounds(start in -5.0f64..5.0, span in 0.0f64..5.0, step in 0.01f64..1.0) {
        let grid = AlphaGrid::new(start, start + span, step).unwrap();
        let points = grid.points();
        prop_assert_eq!(points.len(), grid.len());
        for pair in points.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
        for a in points {
            prop_assert!(a > start && a <= start + span + 1e-6);
        }
    }

    #[test]
    fn best_map_dominates_curve(
        cls in prop::collection::vec(0.01f64..1.0, 2..12),
        prior in prop::collection::vec(0.01f64..1.0, 2..12),
    ) {
        let n = cls.len().min(prior.len());
        let docs = docs(n);
        let total_c: f64 = cls[..n].iter().sum();
        let total_p: f64 = prior[..n].iter().sum();
        let query = CalibrationQuery {
            query_id: "q".into(),
            classifier: NormalizedScoreSet::from_probabilities("q", docs.iter().cloned().zip(cls[..n].iter().map(|c| c / total_c))),
            prior: NormalizedScoreSet::from_probabilities("q", docs.iter().cloned().zip(prior[..n].iter().map(|p| p / total_p))),
            relevant: [docs[0].clone()].into_iter().collect(),
        };
        let result = search(0.0, 2.0, 0.1, &[query], 1e-12).unwrap();
        prop_assert!(result.curve.iter().all(|p| p.map <= result.best_map));
        let first_best = result.curve.iter().find(|p| p.map == result.best_map).unwrap();
        prop_assert_eq!(first_best.alpha, result.best_alpha);
    }
}
