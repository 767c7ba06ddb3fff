//! Deterministic random streams. A seeded run draws from a ChaCha stream
//! derived from the map seed and a salt naming what the stream is for.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub const SALT_MAPGEN: u64 = 0x4E8A_9E40_C0A5_7001;

#[inline]
pub fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

/// Random stream for one purpose of a seeded run.
pub fn stage_rng(seed: u64, salt: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(splitmix64(seed ^ salt))
}
