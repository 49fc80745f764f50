//! quadrank: re-rank first-stage candidate pools with a 4-way relevance
//! classifier fused with the retrieval prior.

#![forbid(unsafe_code)]

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use quadrank_core::tracing::init_tracing;
use quadrank_core::QuadrankConfig;

#[derive(Parser, Debug)]
#[command(name = "quadrank", version, about = "Quadruple-based re-ranking pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML configuration file. Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the sampling seed from the configuration.
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Emit JSON log lines.
    #[arg(long, global = true)]
    json_logs: bool,
}

/// Query, pool and judgment tables.
#[derive(Args, Debug, Clone)]
pub(crate) struct DataArgs {
    /// `query_id,text` table
    #[arg(long)]
    queries: PathBuf,

    /// `query_id,doc_ids,priors` table
    #[arg(long)]
    pools: PathBuf,

    /// `query_id,doc_ids` relevance judgments
    #[arg(long)]
    judgments: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build training quadruples and the validation hold-out
    BuildTrain {
        #[command(flatten)]
        data: DataArgs,

        /// Directory receiving train.csv, validation.csv and the run report
        #[arg(long)]
        out_dir: PathBuf,
    },

    /// Build full-pool quadruples for the calibration queries
    BuildCalibration {
        #[command(flatten)]
        data: DataArgs,

        #[arg(long)]
        out: PathBuf,
    },

    /// Build full-pool quadruples for every query
    BuildInference {
        #[command(flatten)]
        data: DataArgs,

        #[arg(long)]
        out: PathBuf,
    },

    /// Grid-search alpha from classifier scores of the calibration queries
    Calibrate {
        #[command(flatten)]
        data: DataArgs,

        /// `query_id,doc_ids,scores` classifier output
        #[arg(long)]
        scores: PathBuf,

        /// Alpha search result (JSON)
        #[arg(long)]
        out: PathBuf,
    },

    /// Fuse classifier scores with the prior and write final rankings
    Rank {
        #[command(flatten)]
        data: DataArgs,

        #[arg(long)]
        scores: PathBuf,

        /// Fusion weight
        #[arg(long, conflicts_with = "alpha_file", required_unless_present = "alpha_file")]
        alpha: Option<f64>,

        /// Alpha search result written by `calibrate`
        #[arg(long)]
        alpha_file: Option<PathBuf>,

        /// `query_id,ranked_doc_ids` output
        #[arg(long)]
        out: PathBuf,
    },

    /// MAP of a ranking file against judgments
    Evaluate {
        #[arg(long)]
        rankings: PathBuf,

        #[arg(long)]
        judgments: PathBuf,

        /// Write the per-query report (JSON)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn load_config(cli: &Cli) -> anyhow::Result<QuadrankConfig> {
    let mut config = match &cli.config {
        Some(path) => QuadrankConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => QuadrankConfig::default(),
    };
    if cli.seed.is_some() {
        config.sampling.seed = cli.seed;
    }
    if cli.json_logs {
        config.observability.json_logs = true;
    }
    Ok(config)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    init_tracing(&config.observability);

    match cli.command {
        Commands::BuildTrain { data, out_dir } => commands::build_train(config, &data, &out_dir),
        Commands::BuildCalibration { data, out } => commands::build_calibration(config, &data, &out),
        Commands::BuildInference { data, out } => commands::build_inference(config, &data, &out),
        Commands::Calibrate { data, scores, out } => {
            commands::calibrate(config, &data, &scores, &out)
        }
        Commands::Rank {
            data,
            scores,
            alpha,
            alpha_file,
            out,
        } => {
            let alpha = commands::resolve_alpha(alpha, alpha_file.as_deref())?;
            commands::rank(config, &data, &scores, alpha, &out)
        }
        Commands::Evaluate {
            rankings,
            judgments,
            out,
        } => commands::evaluate(&rankings, &judgments, out.as_deref()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
