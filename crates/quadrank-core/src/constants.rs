/// quadrank version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Number of candidate slots in one multiple-choice instance.
pub const QUADRUPLE_WIDTH: usize = 4;

/// Negatives drawn alongside each positive in a training instance.
pub const NEGATIVES_PER_INSTANCE: usize = QUADRUPLE_WIDTH - 1;

/// Upper bound on the number of alpha grid points.
pub const MAX_GRID_POINTS: usize = 1_000_000;

/// Decimal digits kept when MAP values are reported.
pub const REPORT_PRECISION_DIGITS: u32 = 4;

/// Tolerance used when checking that scores already form a distribution.
pub const DISTRIBUTION_TOLERANCE: f64 = 1e-6;

/// Placeholder written in tables for an empty (padding) slot.
pub const EMPTY_SLOT_MARKER: &str = "-";
