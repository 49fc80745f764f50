//! # quadrank-eval
//!
//! Ranking quality and fusion-weight selection:
//! - [`average_precision`] / [`mean_average_precision`] over binary relevance
//! - [`AlphaGrid`] and [`AlphaCalibrator`]: exhaustive search for the α that
//!   maximizes MAP on held-out queries

pub mod average_precision;
pub mod calibrator;
pub mod grid;
pub mod map;

pub use average_precision::average_precision;
pub use calibrator::{search, AlphaCalibrator, CalibrationQuery, CalibrationState};
pub use grid::AlphaGrid;
pub use map::{mean_average_precision, round_for_report, MapReport};
