//! Run report: what a pipeline invocation did and which queries it could
//! not process.

use chrono::{DateTime, Utc};
use quadrank_core::models::{AlphaSearchResult, QueryFailure};
use quadrank_eval::{round_for_report, MapReport};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub stage: String,
    pub version: String,
    /// Global sampling seed, recorded so clock-seeded runs can be replayed.
    pub seed: u64,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub instances_written: usize,
    pub queries_ranked: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha: Option<AlphaSearchResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<MapReport>,
    pub failures: Vec<QueryFailure>,
}

impl RunReport {
    pub fn new(stage: &str, seed: u64) -> Self {
        Self {
            stage: stage.to_string(),
            version: quadrank_core::constants::VERSION.to_string(),
            seed,
            started_at: Utc::now(),
            finished_at: None,
            instances_written: 0,
            queries_ranked: 0,
            alpha: None,
            evaluation: None,
            failures: Vec::new(),
        }
    }

    pub fn record_failures(&mut self, failures: impl IntoIterator<Item = QueryFailure>) {
        self.failures.extend(failures);
        self.failures
            .sort_by(|a, b| a.query_id.cmp(&b.query_id).then_with(|| a.stage.cmp(&b.stage)));
    }

    /// Stamp the end time and round every reported metric.
    pub fn finish(mut self) -> Self {
        self.finished_at = Some(Utc::now());
        if let Some(alpha) = self.alpha.as_mut() {
            alpha.best_map = round_for_report(alpha.best_map);
            for point in &mut alpha.curve {
                point.map = round_for_report(point.map);
            }
        }
        if let Some(eval) = self.evaluation.as_mut() {
            eval.map = round_for_report(eval.map);
            for ap in eval.per_query.values_mut() {
                *ap = round_for_report(*ap);
            }
        }
        self
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}
