//! Placeholder ownership/values tags.
//!
//! No provider knows who owns a business, so these tags are synthesized and
//! must be presented as placeholders. Randomness comes from a [`Seeder`] so a
//! given place carries the same tags on every search.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};

/// Ownership tags a business may be given with 50% probability.
pub const PRIORITY_OWNERSHIP: &[&str] = &[
    "Woman Owned",
    "Latino Owned",
    "Black Owned",
    "LGBTQ+ Owned",
    "Veteran Owned",
];

/// Fallback when a Mapbox feature yields no property-derived tag.
pub const MAPBOX_PLACEHOLDERS: &[&str] = &[
    "Local Business",
    "Mapbox Listed",
    "Community Place",
    "Listed Location",
];

pub const RESTAURANT_TAGS: &[&str] = &[
    "Family Owned",
    "Woman Owned",
    "Minority Owned",
    "Sustainable",
    "Vegan Options",
    "Locally Sourced",
];

pub const STORE_TAGS: &[&str] = &[
    "Locally Owned",
    "Woman Owned",
    "Black Owned",
    "Latino Owned",
    "Asian Owned",
    "LGBTQ+ Owned",
];

/// Derives deterministic PRNGs from a base seed and a string key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Seeder {
    base: u64,
}

impl Seeder {
    #[must_use]
    pub const fn new(base: u64) -> Self {
        Self { base }
    }

    /// First 8 bytes of `SHA-256(base_le || key)`.
    #[must_use]
    pub fn seed(&self, key: &str) -> u64 {
        let mut hasher = Sha256::new();
        hasher.update(self.base.to_le_bytes());
        hasher.update(key.as_bytes());
        let digest = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&digest[..8]);
        u64::from_le_bytes(bytes)
    }

    #[must_use]
    pub fn rng(&self, key: &str) -> StdRng {
        StdRng::seed_from_u64(self.seed(key))
    }
}

/// Push `n` draws from `vocab` into `out`, skipping ones already present.
pub(crate) fn push_distinct<R: Rng + ?Sized>(
    rng: &mut R,
    vocab: &[&str],
    n: usize,
    out: &mut Vec<String>,
) {
    for _ in 0..n {
        if let Some(tag) = vocab.choose(rng) {
            if !out.iter().any(|t| t == tag) {
                out.push((*tag).to_string());
            }
        }
    }
}

/// 50% chance of appending one [`PRIORITY_OWNERSHIP`] tag.
pub(crate) fn maybe_priority_tag<R: Rng + ?Sized>(rng: &mut R, out: &mut Vec<String>) {
    if rng.random_bool(0.5) {
        push_distinct(rng, PRIORITY_OWNERSHIP, 1, out);
    }
}
