use rand::Rng;

use crate::grid::Grid;
use crate::topology::AdjacencyTable;

use super::passes::{randomize, step};

/// Smoothing schedule: erode with {0, 1} six times, then grow blob interiors
/// with {4, 5, 6} three times. Hand-tuned; changing it changes every map.
const SCHEDULE: [(&[u8], usize); 2] = [(&[0, 1], 6), (&[4, 5, 6], 3)];

/// Seeds island blobs: independent noise, then the smoothing schedule.
pub fn seed_islands<R: Rng>(grid: &mut Grid, adj: &AdjacencyTable, water_fraction: f64, rng: &mut R) {
    randomize(grid, water_fraction, rng);
    for (rule, times) in SCHEDULE {
        for _ in 0..times {
            step(grid, adj, rule);
        }
    }
}
