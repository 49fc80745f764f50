use serde::{Deserialize, Serialize};

use super::{DocId, QueryId};

/// Final ordering for one query, most relevant first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ranking {
    pub query_id: QueryId,
    pub docs: Vec<DocId>,
}

impl Ranking {
    pub fn new(query_id: impl Into<QueryId>, docs: Vec<DocId>) -> Self {
        Self {
            query_id: query_id.into(),
            docs,
        }
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}
