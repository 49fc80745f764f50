//! Train/validation split and calibration-query selection.

use rand::seq::{index, SliceRandom};
use rand::Rng;

use quadrank_core::models::{Instance, QueryId};

/// Training instances divided into a fitting set and a held-out set.
#[derive(Debug, Clone, Default)]
pub struct InstanceSplit {
    pub train: Vec<Instance>,
    pub validation: Vec<Instance>,
}

/// Size of the held-out part: `ceil(n · fraction)`, kept within `1..n`
/// whenever the fraction is positive and there is more than one instance.
pub fn validation_size(n: usize, fraction: f64) -> usize {
    if fraction <= 0.0 || n < 2 {
        return 0;
    }
    ((n as f64 * fraction).ceil() as usize).clamp(1, n - 1)
}

/// Shuffle, then hold out the tail as validation.
pub fn train_validation_split<R: Rng + ?Sized>(
    mut instances: Vec<Instance>,
    fraction: f64,
    rng: &mut R,
) -> InstanceSplit {
    instances.shuffle(rng);
    let held_out = validation_size(instances.len(), fraction);
    let validation = instances.split_off(instances.len() - held_out);
    InstanceSplit {
        train: instances,
        validation,
    }
}

/// Draw `k` distinct query ids without replacement, returned sorted.
/// Returns every id when fewer than `k` are available.
pub fn select_calibration_queries<R: Rng + ?Sized>(
    query_ids: &[QueryId],
    k: usize,
    rng: &mut R,
) -> Vec<QueryId> {
    let mut ids: Vec<QueryId> = query_ids.to_vec();
    ids.sort();
    ids.dedup();
    if k < ids.len() {
        let picked = index::sample(rng, ids.len(), k);
        ids = picked.iter().map(|i| ids[i].clone()).collect();
        ids.sort();
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn instance(q: &str) -> Instance {
        Instance {
            query_id: q.to_string(),
            slots: Default::default(),
            permutation: [0, 1, 2, 3],
            gold: None,
        }
    }

    #[test]
    fn validation_size_rounds_up() {
        assert_eq!(validation_size(100, 0.04), 4);
        assert_eq!(validation_size(10, 0.04), 1);
        assert_eq!(validation_size(1, 0.5), 0);
        assert_eq!(validation_size(50, 0.0), 0);
    }

    #[test]
    fn split_preserves_every_instance() {
        let instances: Vec<Instance> = (0..25).map(|i| instance(&format!("q{i}"))).collect();
        let mut rng = StdRng::seed_from_u64(11);
        let split = train_validation_split(instances, 0.04, &mut rng);
        assert_eq!(split.validation.len(), 1);
        assert_eq!(split.train.len(), 24);
    }

    #[test]
    fn selection_is_distinct_and_sorted() {
        let ids: Vec<QueryId> = (0..30).map(|i| format!("q{i:02}")).collect();
        let mut rng = StdRng::seed_from_u64(2);
        let picked = select_calibration_queries(&ids, 10, &mut rng);
        assert_eq!(picked.len(), 10);
        assert!(picked.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn selection_returns_all_when_k_exceeds_pool() {
        let ids: Vec<QueryId> = vec!["b".into(), "a".into(), "a".into()];
        let mut rng = StdRng::seed_from_u64(2);
        assert_eq!(select_calibration_queries(&ids, 60, &mut rng), vec!["a", "b"]);
    }
}
