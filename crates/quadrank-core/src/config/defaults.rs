// Single source of truth for all default values.

// --- Sampling ---
pub const DEFAULT_HARD_NEGATIVE_RATIO: usize = 10;
pub const DEFAULT_VALIDATION_FRACTION: f64 = 0.04;
pub const DEFAULT_CALIBRATION_QUERIES: usize = 60;

// --- Scoring ---
pub const DEFAULT_PROBABILITY_FLOOR: f64 = 1e-12;

// --- Calibration ---
pub const DEFAULT_ALPHA_START: f64 = 0.0;
pub const DEFAULT_ALPHA_STOP: f64 = 5.0;
pub const DEFAULT_ALPHA_STEP: f64 = 0.01;
pub const DEFAULT_PARALLEL_CALIBRATION: bool = true;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
