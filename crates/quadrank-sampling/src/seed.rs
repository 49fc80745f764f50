//! Seed derivation: global seed + pass + query id → independent `StdRng`.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Where the global seed comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedSource {
    Fixed(u64),
    /// Wall-clock nanoseconds, resolved once per run.
    Clock,
}

impl SeedSource {
    pub fn from_config(seed: Option<u64>) -> Self {
        seed.map_or(SeedSource::Clock, SeedSource::Fixed)
    }

    pub fn resolve(self) -> u64 {
        match self {
            SeedSource::Fixed(seed) => seed,
            SeedSource::Clock => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or_default(),
        }
    }
}

/// Build pass a generator is drawn for. Each pass gets its own stream so
/// that, e.g., adding a calibration pass never shifts training negatives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Training,
    Calibration,
    Inference,
    Split,
    Selection,
}

impl Pass {
    pub fn tag(self) -> &'static str {
        match self {
            Pass::Training => "training",
            Pass::Calibration => "calibration",
            Pass::Inference => "inference",
            Pass::Split => "split",
            Pass::Selection => "selection",
        }
    }
}

/// Mix the global seed, pass and key into a 64-bit seed.
pub fn derive_seed(global: u64, pass: Pass, key: &str) -> u64 {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&global.to_le_bytes());
    hasher.update(pass.tag().as_bytes());
    hasher.update(&[0]);
    hasher.update(key.as_bytes());
    let hash = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(bytes)
}

/// Generator for one query in one pass.
pub fn rng_for(global: u64, pass: Pass, key: &str) -> StdRng {
    StdRng::seed_from_u64(derive_seed(global, pass, key))
}
