use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use quadrank_core::errors::QuadrankResult;
use quadrank_core::models::{DocId, QueryId};
use tracing::debug;

use crate::table::{read_rows, split_list};

pub const JUDGMENT_HEADER: [&str; 2] = ["query_id", "doc_ids"];

/// Load relevance judgments: query id → relevant document ids.
/// Repeated rows for a query are unioned.
pub fn read_judgments(path: &Path) -> QuadrankResult<BTreeMap<QueryId, BTreeSet<DocId>>> {
    let mut judgments: BTreeMap<QueryId, BTreeSet<DocId>> = BTreeMap::new();
    for row in read_rows(path, &JUDGMENT_HEADER)? {
        judgments
            .entry(row.fields[0].clone())
            .or_default()
            .extend(split_list(&row.fields[1]).into_iter().map(String::from));
    }
    debug!(path = %path.display(), queries = judgments.len(), "loaded judgments");
    Ok(judgments)
}
