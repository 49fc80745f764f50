//! Training instances: one per positive, with three sampled negatives.

use rand::seq::{index, SliceRandom};
use rand::Rng;
use tracing::debug;

use quadrank_core::constants::{NEGATIVES_PER_INSTANCE, QUADRUPLE_WIDTH};
use quadrank_core::errors::{QuadrankResult, SamplingError};
use quadrank_core::models::{Instance, Query};

use crate::negatives;

/// Build one instance per positive document of `query`.
///
/// Positives are visited in ascending id order. For each, three distinct
/// negatives are drawn uniformly from the eligible set, the positive is put
/// at pre-permutation position 0, and the four slots are shuffled.
pub fn build_training_instances<R: Rng + ?Sized>(
    query: &Query,
    hard_negative_ratio: usize,
    rng: &mut R,
) -> QuadrankResult<Vec<Instance>> {
    let positives = match &query.relevant {
        Some(p) if !p.is_empty() => p,
        _ => {
            return Err(SamplingError::NoPositives {
                query_id: query.id.clone(),
            }
            .into())
        }
    };

    let eligible = negatives::eligible_negatives(&query.pool, positives, hard_negative_ratio);
    if eligible.len() < NEGATIVES_PER_INSTANCE {
        return Err(SamplingError::InsufficientNegatives {
            query_id: query.id.clone(),
            needed: NEGATIVES_PER_INSTANCE,
            available: eligible.len(),
        }
        .into());
    }
    debug!(
        query_id = %query.id,
        positives = positives.len(),
        eligible = eligible.len(),
        pool = query.pool.len(),
        "sampling training negatives"
    );

    let mut instances = Vec::with_capacity(positives.len());
    for positive in positives {
        let picked = index::sample(rng, eligible.len(), NEGATIVES_PER_INSTANCE);
        let mut candidates: Vec<&String> = Vec::with_capacity(QUADRUPLE_WIDTH);
        candidates.push(positive);
        candidates.extend(picked.iter().map(|i| eligible[i]));

        let mut permutation: [usize; QUADRUPLE_WIDTH] = [0, 1, 2, 3];
        permutation.shuffle(rng);

        let slots = permutation.map(|from| Some(candidates[from].clone()));
        let gold = permutation.iter().position(|&from| from == 0);

        instances.push(Instance {
            query_id: query.id.clone(),
            slots,
            permutation,
            gold,
        });
    }
    Ok(instances)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadrank_core::errors::QuadrankErrorCode;
    use quadrank_core::models::CandidatePool;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn query(pool: &[(&str, f64)], positives: &[&str]) -> Query {
        Query::new("q1", "text", CandidatePool::from_entries(pool.iter().cloned()))
            .with_relevant(positives.iter().copied())
    }

    #[test]
    fn one_instance_per_positive() {
        let q = query(
            &[("p1", 0.9), ("p2", 0.8), ("a", 0.5), ("b", 0.4), ("c", 0.3), ("d", 0.2)],
            &["p1", "p2"],
        );
        let mut rng = StdRng::seed_from_u64(1);
        let instances = build_training_instances(&q, 10, &mut rng).unwrap();
        assert_eq!(instances.len(), 2);
        assert_eq!(instances[0].gold_doc().map(String::as_str), Some("p1"));
        assert_eq!(instances[1].gold_doc().map(String::as_str), Some("p2"));
    }

    #[test]
    fn no_positives_fails() {
        let q = Query::new("q9", "t", CandidatePool::from_entries([("a", 1.0)]));
        let mut rng = StdRng::seed_from_u64(1);
        let err = build_training_instances(&q, 10, &mut rng).unwrap_err();
        assert_eq!(err.error_code(), "NO_POSITIVES");
        assert!(err.to_string().contains("q9"));
    }

    #[test]
    fn too_few_negatives_fails() {
        let q = query(&[("p", 0.9), ("a", 0.5), ("b", 0.4)], &["p"]);
        let mut rng = StdRng::seed_from_u64(1);
        let err = build_training_instances(&q, 10, &mut rng).unwrap_err();
        assert_eq!(err.error_code(), "INSUFFICIENT_NEGATIVES");
    }

    #[test]
    fn permutation_is_recorded() {
        let q = query(&[("p", 0.9), ("a", 0.5), ("b", 0.4), ("c", 0.1)], &["p"]);
        let mut rng = StdRng::seed_from_u64(3);
        let inst = &build_training_instances(&q, 10, &mut rng).unwrap()[0];
        let gold = inst.gold.unwrap();
        assert_eq!(inst.permutation[gold], 0);
        let mut sorted = inst.permutation;
        sorted.sort_unstable();
        assert_eq!(sorted, [0, 1, 2, 3]);
    }
}
