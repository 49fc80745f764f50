//! Instance tables exchanged with the external classifier.
//!
//! Outgoing rows are `query_id,doc_ids,label` with four slot tokens and the
//! gold position as label (`-` for unlabelled instances). Scores come back
//! as `query_id,doc_ids,scores`, four tokens each, `-` marking padding.

use std::path::Path;

use quadrank_core::constants::{EMPTY_SLOT_MARKER, QUADRUPLE_WIDTH};
use quadrank_core::errors::QuadrankResult;
use quadrank_core::models::{DocId, Instance, ScoredInstance};

use crate::table::{malformed, read_rows, split_list, write_rows};

pub const INSTANCE_HEADER: [&str; 3] = ["query_id", "doc_ids", "label"];
pub const SCORE_HEADER: [&str; 3] = ["query_id", "doc_ids", "scores"];

const IDENTITY: [usize; QUADRUPLE_WIDTH] = [0, 1, 2, 3];

fn slot_tokens(slots: &[Option<DocId>; QUADRUPLE_WIDTH]) -> String {
    slots
        .iter()
        .map(|s| s.as_deref().unwrap_or(EMPTY_SLOT_MARKER))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn write_instances(path: &Path, instances: &[Instance]) -> QuadrankResult<usize> {
    write_rows(
        path,
        &INSTANCE_HEADER,
        instances.iter().map(|inst| {
            vec![
                inst.query_id.clone(),
                slot_tokens(&inst.slots),
                inst.gold
                    .map_or_else(|| EMPTY_SLOT_MARKER.to_string(), |g| g.to_string()),
            ]
        }),
    )
}

/// Read classifier output. A filled slot must carry a score and a padding
/// slot must not.
pub fn read_scored_instances(path: &Path) -> QuadrankResult<Vec<ScoredInstance>> {
    let mut scored = Vec::new();
    for row in read_rows(path, &SCORE_HEADER)? {
        let docs = split_list(&row.fields[1]);
        let values = split_list(&row.fields[2]);
        if docs.len() != QUADRUPLE_WIDTH || values.len() != QUADRUPLE_WIDTH {
            return Err(malformed(
                path,
                row.line,
                format!(
                    "expected {QUADRUPLE_WIDTH} doc ids and scores, got {} and {}",
                    docs.len(),
                    values.len()
                ),
            ));
        }

        let mut slots: [Option<DocId>; QUADRUPLE_WIDTH] = Default::default();
        let mut scores = [None; QUADRUPLE_WIDTH];
        for (i, (doc, value)) in docs.into_iter().zip(values).enumerate() {
            match (doc == EMPTY_SLOT_MARKER, value == EMPTY_SLOT_MARKER) {
                (true, true) => {}
                (false, false) => {
                    let parsed: f64 = value.parse().map_err(|_| {
                        malformed(path, row.line, format!("score {value:?} is not a number"))
                    })?;
                    slots[i] = Some(doc.to_string());
                    scores[i] = Some(parsed);
                }
                _ => {
                    return Err(malformed(
                        path,
                        row.line,
                        format!("slot {i}: document and score must both be present or both be {EMPTY_SLOT_MARKER}"),
                    ))
                }
            }
        }

        scored.push(ScoredInstance {
            instance: Instance {
                query_id: row.fields[0].clone(),
                slots,
                permutation: IDENTITY,
                gold: None,
            },
            scores,
        });
    }
    Ok(scored)
}
