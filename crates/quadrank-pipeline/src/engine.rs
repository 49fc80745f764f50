//! RerankEngine: drives a run from candidate pools to final rankings.
//!
//! Build passes: training (hard-negative quadruples + validation split),
//! calibration (full pools of the selected held-out queries), inference
//! (full pools of every query).
//! Scoring: classifier output → aggregate → softmax, pool priors → prior
//! distribution.
//! Calibration: α grid search on the held-out queries.
//! Ranking: log-linear fusion at the chosen α.

use std::collections::{BTreeMap, BTreeSet};

use quadrank_core::config::QuadrankConfig;
use quadrank_core::errors::{
    EvaluationError, InputError, QuadrankError, QuadrankResult, ScoringError,
};
use quadrank_core::models::{
    AlphaSearchResult, Instance, NormalizedScoreSet, Query, QueryFailure, QueryId, Ranking,
    ScoredInstance,
};
use quadrank_core::traits::{IClassifierTrainer, IDocumentStore, IRelevanceClassifier};
use quadrank_eval::{mean_average_precision, AlphaCalibrator, CalibrationQuery, MapReport};
use quadrank_sampling::{InstanceSplit, Pass, QuadrupleBuilder};
use quadrank_scoring::{
    aggregate, feed_training, fuse_and_rank, group_by_query, normalize, prior_distribution,
    ClassifierAdapter,
};
use rayon::prelude::*;
use tracing::{info, warn};

use crate::dataset::Dataset;
use crate::report::RunReport;

/// Training instances split for fitting and validation.
#[derive(Debug, Default)]
pub struct TrainingBuild {
    pub split: InstanceSplit,
    pub failures: Vec<QueryFailure>,
}

/// Classifier and prior distributions for one query.
#[derive(Debug, Clone)]
pub struct ScoreSets {
    pub query_id: QueryId,
    pub classifier: NormalizedScoreSet,
    pub prior: NormalizedScoreSet,
}

#[derive(Debug)]
pub struct CalibrationOutcome {
    pub result: AlphaSearchResult,
    pub failures: Vec<QueryFailure>,
}

#[derive(Debug, Default)]
pub struct RankOutcome {
    pub rankings: Vec<Ranking>,
    pub failures: Vec<QueryFailure>,
}

/// Split per-query results into successes and recorded failures.
fn partition<T>(
    results: Vec<(QueryId, QuadrankResult<T>)>,
    stage: &str,
) -> (Vec<T>, Vec<QueryFailure>) {
    let mut ok = Vec::with_capacity(results.len());
    let mut failures = Vec::new();
    for (query_id, result) in results {
        match result {
            Ok(value) => ok.push(value),
            Err(e) => {
                warn!(query_id = %query_id, stage, error = %e, "query failed");
                failures.push(QueryFailure::new(query_id, stage, &e));
            }
        }
    }
    (ok, failures)
}

/// The main pipeline engine.
pub struct RerankEngine {
    config: QuadrankConfig,
    builder: QuadrupleBuilder,
}

impl RerankEngine {
    pub fn new(config: QuadrankConfig) -> QuadrankResult<Self> {
        config.validate()?;
        let builder = QuadrupleBuilder::new(&config.sampling);
        info!(seed = builder.seed(), "engine ready");
        Ok(Self { config, builder })
    }

    pub fn config(&self) -> &QuadrankConfig {
        &self.config
    }

    /// Global seed every random choice of this run derives from.
    pub fn seed(&self) -> u64 {
        self.builder.seed()
    }

    /// Training quadruples for every judged query, then the seeded
    /// train/validation split.
    pub fn build_training(&self, dataset: &Dataset) -> TrainingBuild {
        let judged: Vec<Query> = dataset
            .queries()
            .iter()
            .filter(|q| q.relevant.is_some())
            .cloned()
            .collect();
        let outcome = self.builder.build_training_batch(&judged);
        let split = self
            .builder
            .split(outcome.instances, self.config.sampling.validation_fraction);
        info!(
            train = split.train.len(),
            validation = split.validation.len(),
            "training split"
        );
        TrainingBuild {
            split,
            failures: outcome.failures,
        }
    }

    /// Feed the training side of `build` to an in-process trainer, query by
    /// query in ascending id. Returns the number of instances fed.
    pub fn train(
        &self,
        dataset: &Dataset,
        build: &TrainingBuild,
        trainer: &mut dyn IClassifierTrainer,
        documents: &dyn IDocumentStore,
    ) -> (usize, Vec<QueryFailure>) {
        let mut by_query: BTreeMap<&QueryId, Vec<Instance>> = BTreeMap::new();
        for inst in &build.split.train {
            by_query.entry(&inst.query_id).or_default().push(inst.clone());
        }

        let mut fed = 0;
        let mut failures = Vec::new();
        for (query_id, group) in by_query {
            let result = dataset
                .get(query_id)
                .ok_or_else(|| unknown_query(query_id))
                .and_then(|q| feed_training(&mut *trainer, documents, &q.text, &group));
            match result {
                Ok(n) => fed += n,
                Err(e) => {
                    warn!(query_id = %query_id, error = %e, "query failed in training");
                    failures.push(QueryFailure::new(query_id.clone(), "train", &e));
                }
            }
        }
        info!(fed, failures = failures.len(), "training feed complete");
        (fed, failures)
    }

    /// Held-out queries used for α calibration.
    pub fn calibration_queries(&self, dataset: &Dataset) -> Vec<QueryId> {
        self.builder
            .select_calibration_queries(dataset.queries(), self.config.sampling.calibration_queries)
    }

    /// Full-pool instances of the calibration queries.
    pub fn build_calibration(&self, dataset: &Dataset) -> Vec<Instance> {
        let selected = dataset.subset(&self.calibration_queries(dataset));
        self.builder.build_pool_batch(&selected, Pass::Calibration)
    }

    /// Full-pool instances of every query.
    pub fn build_inference(&self, dataset: &Dataset) -> Vec<Instance> {
        self.builder.build_pool_batch(dataset.queries(), Pass::Inference)
    }

    /// Score instances in-process with a classifier, one query at a time.
    pub fn score_instances(
        &self,
        dataset: &Dataset,
        instances: &[Instance],
        classifier: &dyn IRelevanceClassifier,
        documents: &dyn IDocumentStore,
    ) -> (Vec<ScoredInstance>, Vec<QueryFailure>) {
        let adapter = ClassifierAdapter::new(classifier, documents);
        let mut by_query: BTreeMap<&QueryId, Vec<Instance>> = BTreeMap::new();
        for inst in instances {
            by_query.entry(&inst.query_id).or_default().push(inst.clone());
        }

        let results: Vec<(QueryId, QuadrankResult<Vec<ScoredInstance>>)> = by_query
            .into_par_iter()
            .map(|(query_id, group)| {
                let result = dataset
                    .get(query_id)
                    .ok_or_else(|| unknown_query(query_id))
                    .and_then(|q| adapter.score_instances(&q.text, &group));
                (query_id.clone(), result)
            })
            .collect();
        let (scored, failures) = partition(results, "score");
        (scored.into_iter().flatten().collect(), failures)
    }

    /// Classifier and prior distributions for one query's scored instances.
    pub fn score_set(
        &self,
        dataset: &Dataset,
        query_id: &str,
        scored: &[ScoredInstance],
    ) -> QuadrankResult<ScoreSets> {
        let scoring = &self.config.scoring;
        let query = dataset.get(query_id).ok_or_else(|| unknown_query(query_id))?;
        let raw = aggregate(query_id, scored, scoring.duplicate_policy)?;
        Ok(ScoreSets {
            query_id: query_id.to_string(),
            classifier: normalize(&raw)?,
            prior: prior_distribution(query_id, &query.pool, scoring.prior_normalization)?,
        })
    }

    /// [`Self::score_set`] for every query with scores.
    pub fn score_sets(
        &self,
        dataset: &Dataset,
        scored: Vec<ScoredInstance>,
    ) -> (Vec<ScoreSets>, Vec<QueryFailure>) {
        let results: Vec<(QueryId, QuadrankResult<ScoreSets>)> = group_by_query(scored)
            .into_par_iter()
            .map(|(query_id, group)| {
                let result = self.score_set(dataset, &query_id, &group);
                (query_id, result)
            })
            .collect();
        partition(results, "aggregate")
    }

    /// Grid-search α on every judged query present in `scored`.
    pub fn calibrate(
        &self,
        dataset: &Dataset,
        scored: Vec<ScoredInstance>,
    ) -> QuadrankResult<CalibrationOutcome> {
        let (sets, mut failures) = self.score_sets(dataset, scored);

        let mut held_out = Vec::with_capacity(sets.len());
        for set in sets {
            let relevant = dataset
                .get(&set.query_id)
                .and_then(|q| q.relevant.clone())
                .filter(|r| !r.is_empty());
            match relevant {
                Some(relevant) => held_out.push(CalibrationQuery {
                    query_id: set.query_id,
                    classifier: set.classifier,
                    prior: set.prior,
                    relevant,
                }),
                None => {
                    let e: QuadrankError = EvaluationError::NoGroundTruth {
                        query_id: set.query_id.clone(),
                    }
                    .into();
                    failures.push(QueryFailure::new(set.query_id, "calibrate", &e));
                }
            }
        }

        let calibrator =
            AlphaCalibrator::new(&self.config.calibration, self.config.scoring.probability_floor)?;
        let (held_out, rejected) = calibrator.screen(held_out);
        for (query_id, e) in rejected {
            failures.push(QueryFailure::new(query_id, "calibrate", &e));
        }

        info!(held_out = held_out.len(), "calibrating alpha");
        let result = calibrator.search(&held_out)?;
        Ok(CalibrationOutcome { result, failures })
    }

    /// Fuse and rank every query at `alpha`. Queries of the dataset that
    /// received no scores are reported as failures.
    pub fn rank(&self, dataset: &Dataset, scored: Vec<ScoredInstance>, alpha: f64) -> RankOutcome {
        let (sets, mut failures) = self.score_sets(dataset, scored);
        let floor = self.config.scoring.probability_floor;

        let results: Vec<(QueryId, QuadrankResult<Ranking>)> = sets
            .par_iter()
            .map(|s| (s.query_id.clone(), fuse_and_rank(&s.classifier, &s.prior, alpha, floor)))
            .collect();
        let (rankings, rank_failures) = partition(results, "rank");
        failures.extend(rank_failures);

        let seen: BTreeSet<&str> = sets.iter().map(|s| s.query_id.as_str()).collect();
        for query in dataset.queries().iter().filter(|q| !seen.contains(q.id.as_str())) {
            let already = failures.iter().any(|f| f.query_id == query.id);
            if !already {
                let e: QuadrankError = ScoringError::EmptyScoreSet {
                    query_id: query.id.clone(),
                }
                .into();
                failures.push(QueryFailure::new(query.id.clone(), "rank", &e));
            }
        }

        info!(
            alpha,
            ranked = rankings.len(),
            failures = failures.len(),
            "ranking complete"
        );
        RankOutcome { rankings, failures }
    }

    /// MAP of `rankings` against the judged queries.
    pub fn evaluate(&self, rankings: &[Ranking], dataset: &Dataset) -> QuadrankResult<MapReport> {
        mean_average_precision(rankings, &dataset.judgments())
    }

    /// Whole run in-process: calibrate α on the held-out queries, rank
    /// every query at that α, evaluate where judgments exist.
    pub fn run(
        &self,
        dataset: &Dataset,
        classifier: &dyn IRelevanceClassifier,
        documents: &dyn IDocumentStore,
    ) -> QuadrankResult<(Vec<Ranking>, RunReport)> {
        let mut report = RunReport::new("run", self.seed());

        let calibration = self.build_calibration(dataset);
        let (scored, failures) = self.score_instances(dataset, &calibration, classifier, documents);
        report.record_failures(failures);
        let outcome = self.calibrate(dataset, scored)?;
        report.record_failures(outcome.failures);
        let alpha = outcome.result.best_alpha;
        report.alpha = Some(outcome.result);

        let inference = self.build_inference(dataset);
        report.instances_written = calibration.len() + inference.len();
        let (scored, failures) = self.score_instances(dataset, &inference, classifier, documents);
        report.record_failures(failures);
        let ranked = self.rank(dataset, scored, alpha);
        report.record_failures(ranked.failures);
        report.queries_ranked = ranked.rankings.len();

        if dataset.queries().iter().any(Query::has_ground_truth) {
            match self.evaluate(&ranked.rankings, dataset) {
                Ok(map) => report.evaluation = Some(map),
                Err(e) => warn!(error = %e, "evaluation skipped"),
            }
        }
        Ok((ranked.rankings, report.finish()))
    }
}

fn unknown_query(query_id: &str) -> QuadrankError {
    InputError::UnknownQuery {
        query_id: query_id.to_string(),
        table: "queries".to_string(),
    }
    .into()
}
