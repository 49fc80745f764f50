use std::collections::BTreeSet;
use std::path::Path;

use quadrank_core::errors::QuadrankResult;
use quadrank_core::models::Ranking;

use crate::table::{malformed, read_rows, split_list, write_rows};

pub const RANKING_HEADER: [&str; 2] = ["query_id", "ranked_doc_ids"];

/// Write one row per ranking, most relevant document first.
pub fn write_rankings(path: &Path, rankings: &[Ranking]) -> QuadrankResult<usize> {
    write_rows(
        path,
        &RANKING_HEADER,
        rankings
            .iter()
            .map(|r| vec![r.query_id.clone(), r.docs.join(" ")]),
    )
}

/// Read rankings back. A document ranked twice in one row is rejected.
pub fn read_rankings(path: &Path) -> QuadrankResult<Vec<Ranking>> {
    let mut rankings = Vec::new();
    for row in read_rows(path, &RANKING_HEADER)? {
        let docs = split_list(&row.fields[1]);
        let mut seen = BTreeSet::new();
        if let Some(dup) = docs.iter().find(|d| !seen.insert(**d)) {
            return Err(malformed(
                path,
                row.line,
                format!("document {dup} is ranked twice for query {}", row.fields[0]),
            ));
        }
        rankings.push(Ranking::new(
            row.fields[0].clone(),
            docs.into_iter().map(String::from).collect(),
        ));
    }
    Ok(rankings)
}
