use std::collections::HashMap;

use crate::models::DocId;

/// Read-only lookup of document text by id.
pub trait IDocumentStore: Send + Sync {
    fn text(&self, doc: &str) -> Option<&str>;
}

impl IDocumentStore for HashMap<DocId, String> {
    fn text(&self, doc: &str) -> Option<&str> {
        self.get(doc).map(String::as_str)
    }
}
