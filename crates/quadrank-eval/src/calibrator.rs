//! AlphaCalibrator: exhaustive grid search for the fusion weight.
//!
//! Every grid point fuses and ranks every held-out query, then scores the
//! rankings with MAP. Grid points are independent, so they may run on the
//! rayon pool; the reduction always walks them in ascending alpha, which
//! keeps the winner stable regardless of scheduling.
//!
//! Lifecycle: `Initialized → Evaluating(αᵢ) … → Converged`, or `Failed`
//! when no grid point produced a MAP value.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use quadrank_core::config::CalibrationConfig;
use quadrank_core::errors::{CalibrationError, QuadrankError, QuadrankResult};
use quadrank_core::models::{
    AlphaPoint, AlphaSearchResult, DocId, NormalizedScoreSet, QueryId, Ranking, SkippedAlpha,
};
use quadrank_scoring::fuse_and_rank;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::grid::AlphaGrid;
use crate::map::mean_average_precision;

/// One held-out query as the calibrator sees it.
#[derive(Debug, Clone)]
pub struct CalibrationQuery {
    pub query_id: QueryId,
    pub classifier: NormalizedScoreSet,
    pub prior: NormalizedScoreSet,
    pub relevant: BTreeSet<DocId>,
}

/// Search progress, reported through tracing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CalibrationState {
    Initialized { points: usize },
    Evaluating { index: usize, alpha: f64 },
    Converged { alpha: f64, map: f64 },
    Failed { attempted: usize },
}

impl fmt::Display for CalibrationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initialized { points } => write!(f, "initialized ({points} points)"),
            Self::Evaluating { index, alpha } => write!(f, "evaluating #{index} alpha={alpha}"),
            Self::Converged { alpha, map } => write!(f, "converged alpha={alpha} map={map}"),
            Self::Failed { attempted } => write!(f, "failed after {attempted} points"),
        }
    }
}

/// Grid-search calibrator.
#[derive(Debug, Clone)]
pub struct AlphaCalibrator {
    grid: AlphaGrid,
    probability_floor: f64,
    parallel: bool,
}

impl AlphaCalibrator {
    pub fn new(config: &CalibrationConfig, probability_floor: f64) -> QuadrankResult<Self> {
        Ok(Self {
            grid: AlphaGrid::from_config(config)?,
            probability_floor,
            parallel: config.parallel,
        })
    }

    pub fn with_grid(grid: AlphaGrid, probability_floor: f64) -> Self {
        Self {
            grid,
            probability_floor,
            parallel: true,
        }
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn grid(&self) -> &AlphaGrid {
        &self.grid
    }

    /// Split held-out queries into those that fuse and those that cannot.
    ///
    /// Fusion failures (missing overlap, query mismatch) do not depend on
    /// alpha, so a query that fails once would fail every grid point.
    pub fn screen(
        &self,
        held_out: Vec<CalibrationQuery>,
    ) -> (Vec<CalibrationQuery>, Vec<(QueryId, QuadrankError)>) {
        let mut usable = Vec::with_capacity(held_out.len());
        let mut rejected = Vec::new();
        for query in held_out {
            match fuse_and_rank(&query.classifier, &query.prior, 1.0, self.probability_floor) {
                Ok(_) => usable.push(query),
                Err(e) => {
                    warn!(query_id = %query.query_id, error = %e, "dropping held-out query");
                    rejected.push((query.query_id, e));
                }
            }
        }
        (usable, rejected)
    }

    /// Rank every held-out query at `alpha`.
    pub fn rank_all(&self, held_out: &[CalibrationQuery], alpha: f64) -> QuadrankResult<Vec<Ranking>> {
        held_out
            .iter()
            .map(|q| fuse_and_rank(&q.classifier, &q.prior, alpha, self.probability_floor))
            .collect()
    }

    /// MAP of the held-out set at one alpha.
    pub fn evaluate_alpha(&self, held_out: &[CalibrationQuery], alpha: f64) -> QuadrankResult<AlphaPoint> {
        let rankings = self.rank_all(held_out, alpha)?;
        let relevant: BTreeMap<QueryId, BTreeSet<DocId>> = held_out
            .iter()
            .map(|q| (q.query_id.clone(), q.relevant.clone()))
            .collect();
        let report = mean_average_precision(&rankings, &relevant)?;
        Ok(AlphaPoint {
            alpha,
            map: report.map,
            evaluated_queries: report.evaluated(),
            skipped_queries: report.skipped.len(),
        })
    }

    /// Evaluate every grid point and return the alpha with the highest MAP.
    ///
    /// Ties keep the first (lowest) alpha. Grid points whose evaluation
    /// fails are skipped and recorded; the search fails only when every
    /// point fails or the grid is empty.
    pub fn search(&self, held_out: &[CalibrationQuery]) -> QuadrankResult<AlphaSearchResult> {
        let points = self.grid.points();
        info!(
            state = %CalibrationState::Initialized { points: points.len() },
            queries = held_out.len(),
            "alpha search"
        );

        let evaluate = |(index, alpha): (usize, f64)| {
            debug!(state = %CalibrationState::Evaluating { index, alpha });
            (alpha, self.evaluate_alpha(held_out, alpha))
        };
        let indexed: Vec<(usize, f64)> = points.iter().copied().enumerate().collect();
        let outcomes: Vec<(f64, QuadrankResult<AlphaPoint>)> = if self.parallel {
            indexed.into_par_iter().map(evaluate).collect()
        } else {
            indexed.into_iter().map(evaluate).collect()
        };

        let mut best: Option<(f64, f64)> = None;
        let mut curve = Vec::with_capacity(outcomes.len());
        let mut skipped = Vec::new();
        for (alpha, outcome) in outcomes {
            match outcome {
                Ok(point) => {
                    if best.map_or(true, |(_, map)| point.map > map) {
                        best = Some((point.alpha, point.map));
                    }
                    curve.push(point);
                }
                Err(e) => {
                    warn!(alpha, error = %e, "skipping alpha");
                    skipped.push(SkippedAlpha {
                        alpha,
                        reason: e.to_string(),
                    });
                }
            }
        }

        let Some((best_alpha, best_map)) = best else {
            let attempted = skipped.len();
            warn!(state = %CalibrationState::Failed { attempted }, "alpha search");
            return Err(CalibrationError::AllAlphasFailed {
                attempted,
                last_error: skipped
                    .last()
                    .map_or_else(|| "empty grid".to_string(), |s| s.reason.clone()),
            }
            .into());
        };

        info!(
            state = %CalibrationState::Converged { alpha: best_alpha, map: best_map },
            evaluated = curve.len(),
            skipped = skipped.len(),
            "alpha search"
        );
        Ok(AlphaSearchResult {
            best_alpha,
            best_map,
            curve,
            skipped,
        })
    }
}

/// One-shot search over `start + step ..= stop`.
pub fn search(
    start: f64,
    stop: f64,
    step: f64,
    held_out: &[CalibrationQuery],
    probability_floor: f64,
) -> QuadrankResult<AlphaSearchResult> {
    AlphaCalibrator::with_grid(AlphaGrid::new(start, stop, step)?, probability_floor).search(held_out)
}
