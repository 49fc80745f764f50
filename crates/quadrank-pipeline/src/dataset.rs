//! Queries assembled from the text, pool and judgment tables.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::PathBuf;

use quadrank_core::errors::{InputError, QuadrankResult};
use quadrank_core::models::{CandidatePool, DocId, Query, QueryId};
use tracing::{info, warn};

/// Input table locations for one run. Judgments are absent for test data.
#[derive(Debug, Clone)]
pub struct DatasetPaths {
    pub queries: PathBuf,
    pub pools: PathBuf,
    pub judgments: Option<PathBuf>,
}

/// Immutable query set for a run, ordered by query id.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    queries: Vec<Query>,
}

impl Dataset {
    pub fn load(paths: &DatasetPaths) -> QuadrankResult<Self> {
        let texts = quadrank_io::read_queries(&paths.queries)?;
        let pools = quadrank_io::read_candidate_pools(&paths.pools)?;
        let judgments = match &paths.judgments {
            Some(path) => Some(quadrank_io::read_judgments(path)?),
            None => None,
        };
        Self::assemble(texts, pools, judgments)
    }

    /// Join the three tables on query id.
    ///
    /// Every pooled query must have text. A query with text but no pool gets
    /// an empty pool and fails later with its own diagnostic. Judgments for
    /// queries outside the set are ignored.
    pub fn assemble(
        texts: HashMap<QueryId, String>,
        mut pools: BTreeMap<QueryId, CandidatePool>,
        judgments: Option<BTreeMap<QueryId, BTreeSet<DocId>>>,
    ) -> QuadrankResult<Self> {
        if let Some(query_id) = pools.keys().find(|q| !texts.contains_key(*q)) {
            return Err(InputError::UnknownQuery {
                query_id: query_id.clone(),
                table: "queries".to_string(),
            }
            .into());
        }

        let mut judgments = judgments;
        let mut queries: Vec<Query> = texts
            .into_iter()
            .map(|(id, text)| {
                let pool = pools.remove(&id).unwrap_or_default();
                let relevant = judgments.as_mut().and_then(|j| j.remove(&id));
                let mut query = Query::new(id, text, pool);
                query.relevant = relevant;
                query
            })
            .collect();
        queries.sort_by(|a, b| a.id.cmp(&b.id));

        if let Some(rest) = judgments.filter(|j| !j.is_empty()) {
            warn!(queries = rest.len(), "judgments for unknown queries ignored");
        }
        info!(
            queries = queries.len(),
            judged = queries.iter().filter(|q| q.has_ground_truth()).count(),
            "dataset assembled"
        );
        Ok(Self { queries })
    }

    pub fn from_queries(mut queries: Vec<Query>) -> Self {
        queries.sort_by(|a, b| a.id.cmp(&b.id));
        Self { queries }
    }

    pub fn queries(&self) -> &[Query] {
        &self.queries
    }

    pub fn get(&self, query_id: &str) -> Option<&Query> {
        self.queries
            .binary_search_by(|q| q.id.as_str().cmp(query_id))
            .ok()
            .map(|i| &self.queries[i])
    }

    /// Only the given queries, in id order.
    pub fn subset(&self, ids: &[QueryId]) -> Vec<Query> {
        ids.iter().filter_map(|id| self.get(id)).cloned().collect()
    }

    /// Relevant sets of every judged query.
    pub fn judgments(&self) -> BTreeMap<QueryId, BTreeSet<DocId>> {
        self.queries
            .iter()
            .filter_map(|q| Some((q.id.clone(), q.relevant.clone()?)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}
