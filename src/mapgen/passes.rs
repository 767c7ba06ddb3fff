//! Cellular-automaton passes shared by the generation strategies.
//!
//! Every pass reads neighbor counts from the state before the pass and only
//! then rewrites tiles, so the order tiles are visited in never matters for
//! the counts. Random draws are made in row-major order.

use rand::Rng;
use rayon::prelude::*;
use tracing::debug;

use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::terrain::Terrain;
use crate::topology::AdjacencyTable;

/// Number of on-grid neighbors of every tile whose terrain is `Land`.
pub fn land_neighbor_counts(grid: &Grid, adj: &AdjacencyTable) -> Vec<u8> {
    let tiles = grid.tiles();
    (0..tiles.len())
        .into_par_iter()
        .map(|i| adj.of(i).filter(|&j| tiles[j].terrain == Terrain::Land).count() as u8)
        .collect()
}

/// Independently makes every tile water with probability `water_fraction`,
/// land otherwise.
pub fn randomize<R: Rng>(grid: &mut Grid, water_fraction: f64, rng: &mut R) {
    for tile in grid.tiles_mut() {
        tile.terrain = if rng.gen_bool(water_fraction) {
            Terrain::Water
        } else {
            Terrain::Land
        };
    }
}

/// A tile becomes land iff its land-neighbor count is in `rule`.
pub fn step(grid: &mut Grid, adj: &AdjacencyTable, rule: &[u8]) {
    let counts = land_neighbor_counts(grid, adj);
    for (tile, count) in grid.tiles_mut().iter_mut().zip(counts) {
        tile.terrain = if rule.contains(&count) {
            Terrain::Land
        } else {
            Terrain::Water
        };
    }
}

/// Outcome of one coastline expansion pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Expansion {
    /// Non-water tiles after the pass.
    pub land: usize,
    /// Tiles flipped to land by this pass.
    pub flipped: usize,
    /// Water tiles that could have flipped (two or more land neighbors).
    pub eligible: usize,
}

/// Grows land into water. A water tile with `n > 0` land neighbors becomes
/// land when a fair die roll (1..=6) comes up below `n`. Land never turns
/// back into water here, so `land` never decreases from pass to pass.
pub fn expand_coastlines<R: Rng>(grid: &mut Grid, adj: &AdjacencyTable, rng: &mut R) -> Expansion {
    let counts = land_neighbor_counts(grid, adj);
    let mut pass = Expansion {
        land: 0,
        flipped: 0,
        eligible: 0,
    };
    for (tile, count) in grid.tiles_mut().iter_mut().zip(counts) {
        if tile.terrain != Terrain::Water {
            pass.land += 1;
            continue;
        }
        if count >= 2 {
            pass.eligible += 1;
        }
        if count > 0 && rng.gen_range(1..=6u8) < count {
            tile.terrain = Terrain::Land;
            pass.land += 1;
            pass.flipped += 1;
        }
    }
    pass
}

/// Repeats [`expand_coastlines`] until at least `target` tiles are land.
/// Always runs at least one pass. Returns the land count after each pass.
///
/// Fails with [`Error::Stalled`] if a pass finds no water tile that could
/// ever flip while the target is still unmet; nothing changes after that.
pub fn expand_until<R: Rng>(
    grid: &mut Grid,
    adj: &AdjacencyTable,
    target: f64,
    rng: &mut R,
) -> Result<Vec<usize>> {
    let mut history = Vec::new();
    loop {
        let pass = expand_coastlines(grid, adj, rng);
        history.push(pass.land);
        debug!(
            pass = history.len(),
            land = pass.land,
            flipped = pass.flipped,
            target,
            "expanded coastlines"
        );
        if pass.land as f64 >= target {
            return Ok(history);
        }
        if pass.eligible == 0 {
            return Err(Error::Stalled {
                land: pass.land,
                target: target.ceil() as usize,
            });
        }
    }
}

/// Reshapes coastlines: every tile becomes land when a die roll (1..=6) is
/// below its land-neighbor count and water otherwise. Unlike expansion this
/// can also erode land.
pub fn rand_step<R: Rng>(grid: &mut Grid, adj: &AdjacencyTable, rng: &mut R) {
    let counts = land_neighbor_counts(grid, adj);
    for (tile, count) in grid.tiles_mut().iter_mut().zip(counts) {
        tile.terrain = if rng.gen_range(1..=6u8) < count {
            Terrain::Land
        } else {
            Terrain::Water
        };
    }
}

fn any_neighbor(grid: &Grid, adj: &AdjacencyTable, i: usize, terrain: Terrain) -> bool {
    adj.of(i).any(|j| grid.tiles()[j].terrain == terrain)
}

/// Classifies leftover water: next to land is coast, next to coast is sea,
/// everything else is ocean. Coast must be settled before sea is decided.
pub fn coast_and_sea(grid: &mut Grid, adj: &AdjacencyTable) {
    for i in 0..grid.len() {
        if grid.tiles()[i].terrain == Terrain::Water && any_neighbor(grid, adj, i, Terrain::Land) {
            grid.tiles_mut()[i].terrain = Terrain::Coast;
        }
    }
    for i in 0..grid.len() {
        if grid.tiles()[i].terrain != Terrain::Water {
            continue;
        }
        let open = if any_neighbor(grid, adj, i, Terrain::Coast) {
            Terrain::Sea
        } else {
            Terrain::Ocean
        };
        grid.tiles_mut()[i].terrain = open;
    }
}

/// Turns generic land into grassland.
pub fn draw_land(grid: &mut Grid) {
    for tile in grid.tiles_mut() {
        if tile.terrain == Terrain::Land {
            tile.terrain = Terrain::Grassland;
        }
    }
}
