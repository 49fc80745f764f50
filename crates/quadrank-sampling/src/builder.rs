//! QuadrupleBuilder: batch construction over many queries.
//!
//! Per-query work runs on the rayon pool. Each query draws from its own
//! generator, and results are merged in ascending query id, so output is
//! identical whatever order the workers finish in.

use quadrank_core::config::SamplingConfig;
use quadrank_core::errors::QuadrankResult;
use quadrank_core::models::{Instance, Query, QueryFailure, QueryId};
use rayon::prelude::*;
use tracing::{info, warn};

use crate::inference;
use crate::seed::{self, Pass, SeedSource};
use crate::split::{self, InstanceSplit};
use crate::training;

/// Instances built for a batch of queries plus the queries that failed.
#[derive(Debug, Default)]
pub struct BuildOutcome {
    pub instances: Vec<Instance>,
    pub failures: Vec<QueryFailure>,
}

/// Seeded quadruple builder.
#[derive(Debug, Clone)]
pub struct QuadrupleBuilder {
    global_seed: u64,
    hard_negative_ratio: usize,
}

impl QuadrupleBuilder {
    /// Resolve the seed source once; every pass then derives from it.
    pub fn new(config: &SamplingConfig) -> Self {
        Self::with_seed(
            SeedSource::from_config(config.seed).resolve(),
            config.hard_negative_ratio,
        )
    }

    pub fn with_seed(global_seed: u64, hard_negative_ratio: usize) -> Self {
        Self {
            global_seed,
            hard_negative_ratio,
        }
    }

    /// The resolved global seed (record it to reproduce a clock-seeded run).
    pub fn seed(&self) -> u64 {
        self.global_seed
    }

    /// Training instances for one query.
    pub fn build_training_instances(&self, query: &Query) -> QuadrankResult<Vec<Instance>> {
        let mut rng = seed::rng_for(self.global_seed, Pass::Training, &query.id);
        training::build_training_instances(query, self.hard_negative_ratio, &mut rng)
    }

    /// Full-pool instances for one query in the given pass.
    pub fn build_pool_instances(&self, query: &Query, pass: Pass) -> Vec<Instance> {
        let mut rng = seed::rng_for(self.global_seed, pass, &query.id);
        inference::build_inference_instances(&query.id, &query.pool, &mut rng)
    }

    /// Training instances for every query. Failing queries are reported,
    /// not dropped silently.
    pub fn build_training_batch(&self, queries: &[Query]) -> BuildOutcome {
        let mut results: Vec<(&QueryId, QuadrankResult<Vec<Instance>>)> = queries
            .par_iter()
            .map(|q| (&q.id, self.build_training_instances(q)))
            .collect();
        results.sort_by(|a, b| a.0.cmp(b.0));

        let mut outcome = BuildOutcome::default();
        for (query_id, result) in results {
            match result {
                Ok(instances) => outcome.instances.extend(instances),
                Err(e) => {
                    warn!(query_id = %query_id, error = %e, "skipping query in training build");
                    outcome.failures.push(QueryFailure::new(query_id.as_str(), "build-train", &e));
                }
            }
        }
        info!(
            queries = queries.len(),
            instances = outcome.instances.len(),
            failures = outcome.failures.len(),
            "training build complete"
        );
        outcome
    }

    /// Full-pool instances for every query (calibration or inference pass).
    pub fn build_pool_batch(&self, queries: &[Query], pass: Pass) -> Vec<Instance> {
        let mut per_query: Vec<(&QueryId, Vec<Instance>)> = queries
            .par_iter()
            .map(|q| (&q.id, self.build_pool_instances(q, pass)))
            .collect();
        per_query.sort_by(|a, b| a.0.cmp(b.0));

        let instances: Vec<Instance> = per_query.into_iter().flat_map(|(_, v)| v).collect();
        info!(
            pass = pass.tag(),
            queries = queries.len(),
            instances = instances.len(),
            "pool build complete"
        );
        instances
    }

    /// Hold out `fraction` of the training instances for validation.
    pub fn split(&self, instances: Vec<Instance>, fraction: f64) -> InstanceSplit {
        let mut rng = seed::rng_for(self.global_seed, Pass::Split, "");
        split::train_validation_split(instances, fraction, &mut rng)
    }

    /// Pick up to `k` queries with ground truth for alpha calibration.
    pub fn select_calibration_queries(&self, queries: &[Query], k: usize) -> Vec<QueryId> {
        let candidates: Vec<QueryId> = queries
            .iter()
            .filter(|q| q.has_ground_truth())
            .map(|q| q.id.clone())
            .collect();
        let mut rng = seed::rng_for(self.global_seed, Pass::Selection, "");
        split::select_calibration_queries(&candidates, k, &mut rng)
    }
}
