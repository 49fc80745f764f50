//! Value objects passed between pipeline stages. Each stage returns a fresh
//! structure; nothing here is mutated after it is handed on.

pub mod alpha_search;
pub mod candidate_pool;
pub mod failure;
pub mod instance;
pub mod query;
pub mod ranking;
pub mod score_sets;

pub use alpha_search::{AlphaPoint, AlphaSearchResult, SkippedAlpha};
pub use candidate_pool::CandidatePool;
pub use failure::QueryFailure;
pub use instance::{Instance, ScoredInstance};
pub use query::Query;
pub use ranking::Ranking;
pub use score_sets::{FusedScoreSet, NormalizedScoreSet, RawScoreSet};

/// Query identifier as it appears in the upstream tables.
pub type QueryId = String;

/// Document identifier as it appears in the upstream tables.
pub type DocId = String;
