use super::error_code::{self, QuadrankErrorCode};

/// Malformed or missing upstream data.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}:{line}: malformed row: {reason}")]
    MalformedRow {
        path: String,
        line: usize,
        reason: String,
    },

    #[error("query {query_id}: document {doc_id} has no text")]
    MissingDocument { query_id: String, doc_id: String },

    #[error("query {query_id} not found in {table}")]
    UnknownQuery { query_id: String, table: String },
}

impl QuadrankErrorCode for InputError {
    fn error_code(&self) -> &'static str {
        match self {
            InputError::MissingDocument { .. } => error_code::MISSING_DOCUMENT,
            _ => error_code::INPUT_ERROR,
        }
    }
}
