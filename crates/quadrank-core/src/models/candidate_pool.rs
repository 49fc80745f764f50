use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::DocId;

/// First-stage retrieval result for one query: document ids in upstream
/// order, each with its prior confidence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<(DocId, f64)>", into = "Vec<(DocId, f64)>")]
pub struct CandidatePool {
    entries: Vec<(DocId, f64)>,
    index: BTreeMap<DocId, usize>,
}

impl From<Vec<(DocId, f64)>> for CandidatePool {
    fn from(entries: Vec<(DocId, f64)>) -> Self {
        Self::from_entries(entries)
    }
}

impl From<CandidatePool> for Vec<(DocId, f64)> {
    fn from(pool: CandidatePool) -> Self {
        pool.entries
    }
}

impl CandidatePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(doc, prior)` pairs. Repeated ids keep their first entry.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<DocId>,
    {
        let mut pool = Self::new();
        for (doc, prior) in entries {
            pool.push(doc, prior);
        }
        pool
    }

    /// Append a candidate. Returns `false` (and changes nothing) when the
    /// document is already in the pool.
    pub fn push(&mut self, doc: impl Into<DocId>, prior: f64) -> bool {
        let doc = doc.into();
        if self.index.contains_key(&doc) {
            return false;
        }
        self.index.insert(doc.clone(), self.entries.len());
        self.entries.push((doc, prior));
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, doc: &str) -> bool {
        self.index.contains_key(doc)
    }

    pub fn prior(&self, doc: &str) -> Option<f64> {
        self.index.get(doc).map(|&i| self.entries[i].1)
    }

    /// Candidates in upstream order.
    pub fn iter(&self) -> impl Iterator<Item = (&DocId, f64)> {
        self.entries.iter().map(|(d, p)| (d, *p))
    }

    pub fn doc_ids(&self) -> impl Iterator<Item = &DocId> {
        self.entries.iter().map(|(d, _)| d)
    }

    /// Document ids sorted by descending prior. Equal priors keep upstream order.
    pub fn by_descending_prior(&self) -> Vec<&DocId> {
        let mut sorted: Vec<&(DocId, f64)> = self.entries.iter().collect();
        sorted.sort_by(|a, b| b.1.total_cmp(&a.1));
        sorted.into_iter().map(|(d, _)| d).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_rejects_repeated_document() {
        let mut pool = CandidatePool::new();
        assert!(pool.push("d1", 0.5));
        assert!(!pool.push("d1", 0.9));
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.prior("d1"), Some(0.5));
    }

    #[test]
    fn descending_prior_is_stable_on_ties() {
        let pool = CandidatePool::from_entries([("a", 0.1), ("b", 0.5), ("c", 0.5), ("d", 0.9)]);
        let order: Vec<&str> = pool.by_descending_prior().into_iter().map(String::as_str).collect();
        assert_eq!(order, vec!["d", "b", "c", "a"]);
    }

    #[test]
    fn serde_round_trip_rebuilds_index() {
        let pool = CandidatePool::from_entries([("d1", 0.6), ("d2", 0.4)]);
        let json = serde_json::to_string(&pool).unwrap();
        let back: CandidatePool = serde_json::from_str(&json).unwrap();
        assert!(back.contains("d2"));
        assert_eq!(back, pool);
    }
}
