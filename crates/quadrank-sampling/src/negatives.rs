//! Negative candidate selection.

use std::collections::BTreeSet;

use quadrank_core::models::{CandidatePool, DocId};

/// Whether the pool is large enough, relative to the positives, to restrict
/// negatives to its lower-confidence half (integer division).
pub fn uses_hard_negatives(pool_len: usize, positives: usize, ratio: usize) -> bool {
    positives > 0 && pool_len / positives >= ratio
}

/// Candidates a negative may be drawn from, in descending-prior order.
///
/// When `pool / positives >= ratio` the top `floor(len / 2)` candidates by
/// prior are dropped first. Positives are always excluded.
pub fn eligible_negatives<'a>(
    pool: &'a CandidatePool,
    positives: &BTreeSet<DocId>,
    ratio: usize,
) -> Vec<&'a DocId> {
    let ordered = pool.by_descending_prior();
    let skip = if uses_hard_negatives(pool.len(), positives.len(), ratio) {
        ordered.len() / 2
    } else {
        0
    };
    ordered
        .into_iter()
        .skip(skip)
        .filter(|doc| !positives.contains(*doc))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positives(ids: &[&str]) -> BTreeSet<DocId> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn small_pool_keeps_everything_but_positives() {
        let pool = CandidatePool::from_entries([("a", 0.9), ("p", 0.8), ("b", 0.1)]);
        let eligible = eligible_negatives(&pool, &positives(&["p"]), 10);
        assert_eq!(eligible, vec!["a", "b"]);
    }

    #[test]
    fn large_pool_drops_top_half() {
        let pool = CandidatePool::from_entries(
            (0..20).map(|i| (format!("d{i:02}"), 1.0 - i as f64 / 100.0)),
        );
        let eligible = eligible_negatives(&pool, &positives(&["d15"]), 10);
        assert_eq!(eligible.len(), 9);
        assert!(eligible.iter().all(|d| d.as_str() >= "d10"));
        assert!(!eligible.iter().any(|d| d.as_str() == "d15"));
    }

    #[test]
    fn ratio_uses_integer_division() {
        assert!(uses_hard_negatives(20, 2, 10));
        assert!(!uses_hard_negatives(19, 2, 10));
        assert!(!uses_hard_negatives(5, 0, 10));
    }
}
