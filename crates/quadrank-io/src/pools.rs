use std::collections::BTreeMap;
use std::path::Path;

use quadrank_core::errors::QuadrankResult;
use quadrank_core::models::{CandidatePool, QueryId};
use tracing::debug;

use crate::table::{malformed, read_rows, split_list};

pub const POOL_HEADER: [&str; 3] = ["query_id", "doc_ids", "priors"];

/// Load candidate pools keyed by query id.
///
/// Each row carries parallel `doc_ids` / `priors` lists; a query may span
/// several rows (one row per document is the degenerate case). A document
/// listed twice for the same query is rejected.
pub fn read_candidate_pools(path: &Path) -> QuadrankResult<BTreeMap<QueryId, CandidatePool>> {
    let mut pools: BTreeMap<QueryId, CandidatePool> = BTreeMap::new();

    for row in read_rows(path, &POOL_HEADER)? {
        let docs = split_list(&row.fields[1]);
        let priors = split_list(&row.fields[2]);
        if docs.len() != priors.len() {
            return Err(malformed(
                path,
                row.line,
                format!("{} doc ids but {} priors", docs.len(), priors.len()),
            ));
        }

        let pool = pools.entry(row.fields[0].clone()).or_default();
        for (doc, prior) in docs.into_iter().zip(priors) {
            let value: f64 = prior
                .parse()
                .map_err(|_| malformed(path, row.line, format!("prior {prior:?} is not a number")))?;
            if !pool.push(doc, value) {
                return Err(malformed(
                    path,
                    row.line,
                    format!("document {doc} appears twice for query {}", row.fields[0]),
                ));
            }
        }
    }

    debug!(path = %path.display(), queries = pools.len(), "loaded candidate pools");
    Ok(pools)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn pools(content: &str) -> QuadrankResult<BTreeMap<QueryId, CandidatePool>> {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        read_candidate_pools(file.path())
    }

    #[test]
    fn rows_for_one_query_merge() {
        let loaded = pools("query_id,doc_ids,priors\nq1,d1 d2,12.5 9\nq1,d3,1\nq2,d9,0.5\n").unwrap();
        assert_eq!(loaded["q1"].len(), 3);
        assert_eq!(loaded["q1"].prior("d2"), Some(9.0));
        assert_eq!(loaded["q2"].doc_ids().collect::<Vec<_>>(), vec!["d9"]);
    }

    #[test]
    fn mismatched_lists_are_malformed() {
        assert!(pools("q1,d1 d2,1\n").is_err());
    }

    #[test]
    fn duplicate_document_is_malformed() {
        let err = pools("q1,d1,1\nq1,d1,2\n").unwrap_err();
        assert!(err.to_string().contains("appears twice"));
    }

    #[test]
    fn non_numeric_prior_is_malformed() {
        assert!(pools("q1,d1,high\n").is_err());
    }
}
