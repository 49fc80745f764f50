//! # quadrank-sampling
//!
//! Turns relevance judgments and candidate pools into fixed-size 4-way
//! multiple-choice instances.
//!
//! - Training: one instance per positive, three negatives drawn without
//!   repetition, biased toward the low-confidence half of large pools.
//! - Inference / calibration: the whole pool shuffled and cut into groups
//!   of four, the tail group padded with empty slots.
//!
//! All randomness comes from a per-query generator derived from one global
//! seed, so results do not depend on execution order.

pub mod builder;
pub mod inference;
pub mod negatives;
pub mod seed;
pub mod split;
pub mod training;

pub use builder::{BuildOutcome, QuadrupleBuilder};
pub use seed::{Pass, SeedSource};
pub use split::InstanceSplit;
