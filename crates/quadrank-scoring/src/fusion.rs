//! Log-linear fusion of classifier and prior distributions.

use std::collections::BTreeMap;

use quadrank_core::errors::{QuadrankResult, ScoringError};
use quadrank_core::models::{FusedScoreSet, NormalizedScoreSet, Ranking};
use tracing::debug;

/// Raise `p` to `floor` when it is non-positive or NaN, so `log2` stays finite.
pub fn clamp_probability(p: f64, floor: f64) -> f64 {
    if p.is_nan() || p < floor {
        floor
    } else {
        p
    }
}

/// `log2(classifier) + alpha · log2(prior)` for every document present in
/// both distributions. Documents missing from either side are left out.
pub fn fuse(
    classifier: &NormalizedScoreSet,
    prior: &NormalizedScoreSet,
    alpha: f64,
    floor: f64,
) -> QuadrankResult<FusedScoreSet> {
    if classifier.query_id != prior.query_id {
        return Err(ScoringError::QueryMismatch {
            left: classifier.query_id.clone(),
            right: prior.query_id.clone(),
        }
        .into());
    }

    let mut clamped = 0usize;
    let mut scores = BTreeMap::new();
    for (doc, &p_cls) in &classifier.probabilities {
        let Some(p_prior) = prior.get(doc) else {
            continue;
        };
        let c = clamp_probability(p_cls, floor);
        let p = clamp_probability(p_prior, floor);
        if c != p_cls || p != p_prior {
            clamped += 1;
        }
        scores.insert(doc.clone(), c.log2() + alpha * p.log2());
    }

    if scores.is_empty() {
        return Err(ScoringError::NoOverlap {
            query_id: classifier.query_id.clone(),
        }
        .into());
    }
    if clamped > 0 {
        debug!(query_id = %classifier.query_id, clamped, floor, "clamped probabilities before log2");
    }

    Ok(FusedScoreSet {
        query_id: classifier.query_id.clone(),
        alpha,
        scores,
    })
}

/// Order documents by descending fused score; ties go to the smaller id.
pub fn rank(fused: &FusedScoreSet) -> Ranking {
    let mut entries: Vec<(&String, f64)> = fused.scores.iter().map(|(d, s)| (d, *s)).collect();
    entries.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    Ranking::new(
        fused.query_id.clone(),
        entries.into_iter().map(|(d, _)| d.clone()).collect(),
    )
}

/// [`fuse`] then [`rank`].
pub fn fuse_and_rank(
    classifier: &NormalizedScoreSet,
    prior: &NormalizedScoreSet,
    alpha: f64,
    floor: f64,
) -> QuadrankResult<Ranking> {
    fuse(classifier, prior, alpha, floor).map(|f| rank(&f))
}
