//! `id,text` tables for query and document text.

use std::collections::HashMap;
use std::path::Path;

use quadrank_core::errors::QuadrankResult;
use tracing::debug;

use crate::table::{malformed, read_rows};

pub const QUERY_HEADER: [&str; 2] = ["query_id", "text"];
pub const DOCUMENT_HEADER: [&str; 2] = ["doc_id", "text"];

fn read_texts(path: &Path, header: &[&str]) -> QuadrankResult<HashMap<String, String>> {
    let mut texts = HashMap::new();
    for row in read_rows(path, header)? {
        let [id, text] = <[String; 2]>::try_from(row.fields)
            .map_err(|_| malformed(path, row.line, "expected id and text"))?;
        if texts.insert(id.clone(), text).is_some() {
            return Err(malformed(path, row.line, format!("duplicate id {id}")));
        }
    }
    debug!(path = %path.display(), rows = texts.len(), "loaded texts");
    Ok(texts)
}

pub fn read_queries(path: &Path) -> QuadrankResult<HashMap<String, String>> {
    read_texts(path, &QUERY_HEADER)
}

pub fn read_documents(path: &Path) -> QuadrankResult<HashMap<String, String>> {
    read_texts(path, &DOCUMENT_HEADER)
}
