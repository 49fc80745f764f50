//! # quadrank-pipeline
//!
//! Wires sampling, scoring and evaluation into the stages a run goes
//! through:
//!
//! 1. build training / calibration / inference instances
//! 2. ingest classifier scores and turn them into distributions
//! 3. grid-search α on the calibration queries
//! 4. fuse, rank and (when judgments exist) evaluate
//!
//! Per-query failures are collected into a [`RunReport`] rather than
//! aborting the batch.

pub mod dataset;
pub mod engine;
pub mod report;

pub use dataset::{Dataset, DatasetPaths};
pub use engine::{CalibrationOutcome, RankOutcome, RerankEngine, ScoreSets, TrainingBuild};
pub use report::RunReport;
