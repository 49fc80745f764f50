//! # quadrank-scoring
//!
//! Classifier output → per-document scores → probability distributions →
//! log-linear fusion with the first-stage prior:
//!
//! ```text
//! fused(d) = log2(P_classifier(d)) + α · log2(P_prior(d))
//! ```

pub mod adapter;
pub mod aggregator;
pub mod fusion;
pub mod prior;
pub mod softmax;

pub use adapter::{feed_training, ClassifierAdapter};
pub use aggregator::{aggregate, group_by_query};
pub use fusion::{fuse, fuse_and_rank, rank};
pub use prior::prior_distribution;
pub use softmax::{normalize, softmax};
