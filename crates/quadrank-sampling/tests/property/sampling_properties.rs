use std::collections::BTreeSet;

use proptest::prelude::*;
use quadrank_core::models::{CandidatePool, Query};
use quadrank_sampling::{Pass, QuadrupleBuilder};

fn make_query(pool_size: usize, positives: usize) -> Query {
    let pool = CandidatePool::from_entries(
        (0..pool_size).map(|i| (format!("d{i:03}"), (pool_size - i) as f64)),
    );
    // Positives are spread through the pool, not just at the top.
    let relevant: Vec<String> = (0..positives)
        .map(|i| format!("d{:03}", (i * 7) % pool_size))
        .collect();
    Query::new("q", "text", pool).with_relevant(relevant)
}

// ── Training instances: 4 distinct docs, gold matches the positive ───────

proptest! {
    #[test]
    fn training_instances_are_well_formed(
        pool_size in 8usize..80,
        positives in 1usize..4,
        seed in any::<u64>(),
    ) {
        let query = make_query(pool_size, positives);
        let relevant = query.relevant.clone().unwrap();
        let builder = QuadrupleBuilder::with_seed(seed, 10);

        let instances = match builder.build_training_instances(&query) {
            Ok(instances) => instances,
            // Small pools with several positives may lack eligible negatives.
            Err(_) => return Ok(()),
        };
        prop_assert_eq!(instances.len(), relevant.len());

        for inst in &instances {
            let docs: BTreeSet<&String> = inst.doc_ids().collect();
            prop_assert_eq!(docs.len(), 4);
            let gold = inst.gold.expect("training instance has gold");
            prop_assert!(gold < 4);
            prop_assert_eq!(inst.permutation[gold], 0);
            let gold_doc = inst.gold_doc().unwrap();
            prop_assert!(relevant.contains(gold_doc));
            let golds_in_slots = inst.doc_ids().filter(|d| relevant.contains(*d)).count();
            prop_assert_eq!(golds_in_slots, 1);
        }
    }
}

// ── Same seed, same instances ────────────────────────────────────────────

proptest! {
    #[test]
    fn training_build_is_reproducible(pool_size in 8usize..40, seed in any::<u64>()) {
        let query = make_query(pool_size, 1);
        let a = QuadrupleBuilder::with_seed(seed, 10).build_training_instances(&query).unwrap();
        let b = QuadrupleBuilder::with_seed(seed, 10).build_training_instances(&query).unwrap();
        prop_assert_eq!(a, b);
    }
}

// ── Pool partition covers every candidate exactly once ───────────────────

proptest! {
    #[test]
    fn pool_partition_is_exact(pool_size in 0usize..60, seed in any::<u64>()) {
        let query = make_query(pool_size.max(1), 1);
        let instances = QuadrupleBuilder::with_seed(seed, 10)
            .build_pool_instances(&query, Pass::Inference);

        let expected_groups = (query.pool.len() + 3) / 4;
        prop_assert_eq!(instances.len(), expected_groups);

        let seen: Vec<&String> = instances.iter().flat_map(|i| i.doc_ids()).collect();
        let unique: BTreeSet<&String> = seen.iter().copied().collect();
        prop_assert_eq!(seen.len(), query.pool.len());
        prop_assert_eq!(unique.len(), query.pool.len());

        // Only the last group may be padded.
        for inst in instances.iter().rev().skip(1) {
            prop_assert_eq!(inst.filled(), 4);
        }
    }
}

// ── 25-document pool with two in-pool positives: negatives from the lower half ──

#[test]
fn large_pool_negatives_come_from_lower_half() {
    let pool = CandidatePool::from_entries(
        (1..=25).map(|i| (format!("d{i:02}"), 1.0 - i as f64 / 100.0)),
    );
    let query = Query::new("q", "text", pool.clone()).with_relevant(["d03", "d20"]);
    let top_half: BTreeSet<&String> = pool.by_descending_prior().into_iter().take(12).collect();

    for seed in 0..50 {
        let instances = QuadrupleBuilder::with_seed(seed, 10)
            .build_training_instances(&query)
            .unwrap();
        assert_eq!(instances.len(), 2);
        for inst in &instances {
            let gold = inst.gold.unwrap();
            for (slot, doc) in inst.slots.iter().enumerate() {
                let doc = doc.as_ref().unwrap();
                if slot == gold {
                    assert!(doc == "d03" || doc == "d20");
                    continue;
                }
                assert_ne!(doc, "d20", "positive d20 drawn as a negative");
                assert!(!top_half.contains(doc), "negative {doc} is in the top half");
            }
        }
    }
}
