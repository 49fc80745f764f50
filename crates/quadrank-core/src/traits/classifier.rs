use crate::constants::QUADRUPLE_WIDTH;
use crate::errors::QuadrankResult;

/// Boundary to the external multiple-choice relevance model.
///
/// Given a query and four candidate texts, returns one score per slot,
/// aligned positionally with the input. `None` slots are padding; the
/// classifier may return anything for them and the value is discarded.
pub trait IRelevanceClassifier: Send + Sync {
    fn score(
        &self,
        query_text: &str,
        candidates: [Option<&str>; QUADRUPLE_WIDTH],
    ) -> QuadrankResult<[f64; QUADRUPLE_WIDTH]>;

    /// Human-readable model name.
    fn name(&self) -> &str;
}

/// Supervision hook for classifiers that are trained in-process.
pub trait IClassifierTrainer {
    /// Feed one training instance; `gold` is the index (0-3) of the positive.
    fn train(
        &mut self,
        query_text: &str,
        candidates: [&str; QUADRUPLE_WIDTH],
        gold: usize,
    ) -> QuadrankResult<()>;
}
