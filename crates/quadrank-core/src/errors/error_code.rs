//! Stable machine-readable codes for failure reports.

/// Every error enum maps each variant to a code string that downstream
/// tooling can match on without parsing messages.
pub trait QuadrankErrorCode {
    /// Returns the code string (e.g., "EMPTY_SCORE_SET").
    fn error_code(&self) -> &'static str;

    /// Returns `[CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const INPUT_ERROR: &str = "INPUT_ERROR";
pub const MISSING_DOCUMENT: &str = "MISSING_DOCUMENT";
pub const NO_POSITIVES: &str = "NO_POSITIVES";
pub const INSUFFICIENT_NEGATIVES: &str = "INSUFFICIENT_NEGATIVES";
pub const EMPTY_SCORE_SET: &str = "EMPTY_SCORE_SET";
pub const DUPLICATE_DOCUMENT: &str = "DUPLICATE_DOCUMENT";
pub const NON_FINITE_SCORE: &str = "NON_FINITE_SCORE";
pub const QUERY_MISMATCH: &str = "QUERY_MISMATCH";
pub const NO_OVERLAP: &str = "NO_OVERLAP";
pub const CLASSIFIER_ERROR: &str = "CLASSIFIER_ERROR";
pub const NO_GROUND_TRUTH: &str = "NO_GROUND_TRUTH";
pub const NO_EVALUABLE_QUERIES: &str = "NO_EVALUABLE_QUERIES";
pub const INVALID_GRID: &str = "INVALID_GRID";
pub const ALL_ALPHAS_FAILED: &str = "ALL_ALPHAS_FAILED";
