//! # quadrank-core
//!
//! Foundation crate for the quadrank re-ranking pipeline.
//! Defines the data model, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;
pub mod tracing;

// Re-export the most commonly used types at the crate root.
pub use config::QuadrankConfig;
pub use errors::{QuadrankError, QuadrankResult};
pub use models::{
    AlphaPoint, AlphaSearchResult, CandidatePool, DocId, FusedScoreSet, Instance,
    NormalizedScoreSet, Query, QueryFailure, QueryId, Ranking, RawScoreSet, ScoredInstance,
};
