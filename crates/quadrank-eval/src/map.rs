use std::collections::{BTreeMap, BTreeSet};

use quadrank_core::constants::REPORT_PRECISION_DIGITS;
use quadrank_core::errors::{EvaluationError, QuadrankResult};
use quadrank_core::models::{DocId, QueryId, Ranking};
use serde::{Deserialize, Serialize};

use crate::average_precision::average_precision;

/// MAP over a set of rankings, with per-query detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapReport {
    pub map: f64,
    pub per_query: BTreeMap<QueryId, f64>,
    /// Queries with no (or an empty) relevant set.
    pub skipped: Vec<QueryId>,
}

impl MapReport {
    pub fn evaluated(&self) -> usize {
        self.per_query.len()
    }
}

/// Arithmetic mean of AP over every ranking that has ground truth.
///
/// Rankings without ground truth are skipped and listed in the report.
/// Fails when no ranking can be evaluated.
pub fn mean_average_precision(
    rankings: &[Ranking],
    relevant: &BTreeMap<QueryId, BTreeSet<DocId>>,
) -> QuadrankResult<MapReport> {
    let mut per_query = BTreeMap::new();
    let mut skipped = Vec::new();

    for ranking in rankings {
        match relevant.get(&ranking.query_id) {
            Some(rel) if !rel.is_empty() => {
                per_query.insert(ranking.query_id.clone(), average_precision(ranking, rel)?);
            }
            _ => skipped.push(ranking.query_id.clone()),
        }
    }

    if per_query.is_empty() {
        return Err(EvaluationError::NoEvaluableQueries {
            queries: rankings.len(),
        }
        .into());
    }

    let map = per_query.values().sum::<f64>() / per_query.len() as f64;
    Ok(MapReport {
        map,
        per_query,
        skipped,
    })
}

/// Round to the reporting precision. Only for output, never mid-computation.
pub fn round_for_report(value: f64) -> f64 {
    let scale = 10f64.powi(REPORT_PRECISION_DIGITS as i32);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    fn judgments(entries: &[(&str, &[&str])]) -> BTreeMap<QueryId, BTreeSet<DocId>> {
        entries
            .iter()
            .map(|(q, docs)| (q.to_string(), docs.iter().map(|d| d.to_string()).collect()))
            .collect()
    }

    #[test]
    fn mean_of_per_query_ap() {
        let rankings = vec![
            Ranking::new("q1", vec!["a".into(), "b".into()]),
            Ranking::new("q2", vec!["c".into(), "d".into()]),
        ];
        let rel = judgments(&[("q1", &["a"]), ("q2", &["d"])]);
        let report = mean_average_precision(&rankings, &rel).unwrap();
        assert_eq!(report.map, 0.75);
        assert_eq!(report.evaluated(), 2);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn queries_without_ground_truth_are_skipped() {
        let rankings = vec![
            Ranking::new("q1", vec!["a".into()]),
            Ranking::new("q2", vec!["b".into()]),
            Ranking::new("q3", vec!["c".into()]),
        ];
        let rel = judgments(&[("q1", &["a"]), ("q3", &[])]);
        let report = mean_average_precision(&rankings, &rel).unwrap();
        assert_eq!(report.map, 1.0);
        assert_eq!(report.skipped, vec!["q2", "q3"]);
    }

    #[test]
    fn no_evaluable_query_fails() {
        let rankings = vec![Ranking::new("q1", vec!["a".into()])];
        assert!(mean_average_precision(&rankings, &BTreeMap::new()).is_err());
    }

    #[test]
    fn rounding_keeps_four_digits() {
        assert_eq!(round_for_report(0.123_456), 0.1235);
        assert_eq!(round_for_report(1.0), 1.0);
    }
}
