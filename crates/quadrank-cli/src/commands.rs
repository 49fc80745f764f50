//! Subcommand bodies. Each stage writes its artifact plus a run report
//! (`<artifact>.report.json`) listing the queries it could not process.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use quadrank_core::models::AlphaSearchResult;
use quadrank_core::QuadrankConfig;
use quadrank_eval::round_for_report;
use quadrank_pipeline::{Dataset, DatasetPaths, RerankEngine, RunReport};
use tracing::{info, warn};

use crate::DataArgs;

fn load_dataset(data: &DataArgs) -> anyhow::Result<Dataset> {
    Ok(Dataset::load(&DatasetPaths {
        queries: data.queries.clone(),
        pools: data.pools.clone(),
        judgments: data.judgments.clone(),
    })?)
}

fn require_judgments(data: &DataArgs, stage: &str) -> anyhow::Result<()> {
    if data.judgments.is_none() {
        bail!("{stage} needs --judgments");
    }
    Ok(())
}

/// `rankings.csv` → `rankings.report.json`
pub(crate) fn report_path(artifact: &Path) -> PathBuf {
    artifact.with_extension("report.json")
}

fn write_report(path: &Path, report: RunReport) -> anyhow::Result<()> {
    let report = report.finish();
    if report.has_failures() {
        warn!(
            failures = report.failures.len(),
            report = %path.display(),
            "some queries failed"
        );
    }
    quadrank_io::write_json(path, &report)
        .with_context(|| format!("writing report {}", path.display()))
}

pub fn build_train(config: QuadrankConfig, data: &DataArgs, out_dir: &Path) -> anyhow::Result<()> {
    require_judgments(data, "build-train")?;
    let engine = RerankEngine::new(config)?;
    let dataset = load_dataset(data)?;
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let build = engine.build_training(&dataset);
    let train = quadrank_io::write_instances(&out_dir.join("train.csv"), &build.split.train)?;
    let validation =
        quadrank_io::write_instances(&out_dir.join("validation.csv"), &build.split.validation)?;

    let mut report = RunReport::new("build-train", engine.seed());
    report.instances_written = train + validation;
    report.record_failures(build.failures);
    write_report(&out_dir.join("build-train.report.json"), report)?;
    info!(train, validation, "training instances written");
    Ok(())
}

pub fn build_calibration(config: QuadrankConfig, data: &DataArgs, out: &Path) -> anyhow::Result<()> {
    require_judgments(data, "build-calibration")?;
    let engine = RerankEngine::new(config)?;
    let dataset = load_dataset(data)?;

    let instances = engine.build_calibration(&dataset);
    let mut report = RunReport::new("build-calibration", engine.seed());
    report.instances_written = quadrank_io::write_instances(out, &instances)?;
    write_report(&report_path(out), report)
}

pub fn build_inference(config: QuadrankConfig, data: &DataArgs, out: &Path) -> anyhow::Result<()> {
    let engine = RerankEngine::new(config)?;
    let dataset = load_dataset(data)?;

    let instances = engine.build_inference(&dataset);
    let mut report = RunReport::new("build-inference", engine.seed());
    report.instances_written = quadrank_io::write_instances(out, &instances)?;
    write_report(&report_path(out), report)
}

pub fn calibrate(
    config: QuadrankConfig,
    data: &DataArgs,
    scores: &Path,
    out: &Path,
) -> anyhow::Result<()> {
    require_judgments(data, "calibrate")?;
    let engine = RerankEngine::new(config)?;
    let dataset = load_dataset(data)?;
    let scored = quadrank_io::read_scored_instances(scores)?;

    let outcome = engine.calibrate(&dataset, scored)?;
    quadrank_io::write_json(out, &outcome.result)?;
    println!(
        "best alpha {} (MAP {:.4})",
        outcome.result.best_alpha,
        round_for_report(outcome.result.best_map)
    );

    let mut report = RunReport::new("calibrate", engine.seed());
    report.alpha = Some(outcome.result);
    report.record_failures(outcome.failures);
    write_report(&report_path(out), report)
}

/// Alpha from the flag, or the best alpha of a `calibrate` result file.
pub fn resolve_alpha(alpha: Option<f64>, alpha_file: Option<&Path>) -> anyhow::Result<f64> {
    match (alpha, alpha_file) {
        (Some(alpha), _) => Ok(alpha),
        (None, Some(path)) => {
            let result: AlphaSearchResult = quadrank_io::read_json(path)
                .with_context(|| format!("reading alpha file {}", path.display()))?;
            Ok(result.best_alpha)
        }
        (None, None) => bail!("either --alpha or --alpha-file is required"),
    }
}

pub fn rank(
    config: QuadrankConfig,
    data: &DataArgs,
    scores: &Path,
    alpha: f64,
    out: &Path,
) -> anyhow::Result<()> {
    if !alpha.is_finite() {
        bail!("alpha must be finite, got {alpha}");
    }
    let engine = RerankEngine::new(config)?;
    let dataset = load_dataset(data)?;
    let scored = quadrank_io::read_scored_instances(scores)?;

    let outcome = engine.rank(&dataset, scored, alpha);
    quadrank_io::write_rankings(out, &outcome.rankings)?;

    let mut report = RunReport::new("rank", engine.seed());
    report.queries_ranked = outcome.rankings.len();
    report.record_failures(outcome.failures);
    if data.judgments.is_some() {
        match engine.evaluate(&outcome.rankings, &dataset) {
            Ok(map) => report.evaluation = Some(map),
            Err(e) => warn!(error = %e, "rankings not evaluated"),
        }
    }
    write_report(&report_path(out), report)
}

pub fn evaluate(rankings: &Path, judgments: &Path, out: Option<&Path>) -> anyhow::Result<()> {
    let rankings = quadrank_io::read_rankings(rankings)?;
    let judgments = quadrank_io::read_judgments(judgments)?;
    let report = quadrank_eval::mean_average_precision(&rankings, &judgments)?;

    println!(
        "MAP {:.4} over {} queries ({} skipped)",
        round_for_report(report.map),
        report.evaluated(),
        report.skipped.len()
    );
    if let Some(path) = out {
        let mut rounded = report;
        rounded.map = round_for_report(rounded.map);
        for ap in rounded.per_query.values_mut() {
            *ap = round_for_report(*ap);
        }
        quadrank_io::write_json(path, &rounded)?;
    }
    Ok(())
}
