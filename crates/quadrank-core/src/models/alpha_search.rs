use serde::{Deserialize, Serialize};

/// MAP achieved at one grid point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlphaPoint {
    pub alpha: f64,
    pub map: f64,
    /// Held-out queries that contributed an AP value.
    pub evaluated_queries: usize,
    /// Held-out queries skipped for lack of ground truth.
    pub skipped_queries: usize,
}

/// A grid point that could not be evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedAlpha {
    pub alpha: f64,
    pub reason: String,
}

/// Outcome of the alpha grid search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlphaSearchResult {
    pub best_alpha: f64,
    pub best_map: f64,
    /// Every evaluated grid point, in ascending alpha.
    pub curve: Vec<AlphaPoint>,
    pub skipped: Vec<SkippedAlpha>,
}

impl AlphaSearchResult {
    /// Grid points attempted, evaluated or skipped.
    pub fn attempted(&self) -> usize {
        self.curve.len() + self.skipped.len()
    }
}
