//! Inference / calibration instances: shuffle the whole pool, cut into fours.

use rand::seq::SliceRandom;
use rand::Rng;

use quadrank_core::constants::QUADRUPLE_WIDTH;
use quadrank_core::models::{CandidatePool, DocId, Instance};

/// Partition the pool into groups of four after one shuffle.
///
/// Every candidate lands in exactly one instance. When the pool size is not
/// a multiple of four the last instance is padded with `None` slots. An
/// empty pool yields no instances.
pub fn build_inference_instances<R: Rng + ?Sized>(
    query_id: &str,
    pool: &CandidatePool,
    rng: &mut R,
) -> Vec<Instance> {
    let mut docs: Vec<&DocId> = pool.doc_ids().collect();
    docs.shuffle(rng);

    docs.chunks(QUADRUPLE_WIDTH)
        .map(|group| {
            let mut slots: [Option<DocId>; QUADRUPLE_WIDTH] = Default::default();
            for (slot, doc) in slots.iter_mut().zip(group) {
                *slot = Some((*doc).clone());
            }
            Instance {
                query_id: query_id.to_string(),
                slots,
                permutation: [0, 1, 2, 3],
                gold: None,
            }
        })
        .collect()
}
