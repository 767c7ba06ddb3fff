//! Landmass generation.
//!
//! Both strategies seed some land, grow it with coastline expansion until the
//! requested share of the map is land, then classify water into coast, sea
//! and ocean and turn raw land into grassland.

pub mod archipelago;
pub mod continents;
pub mod passes;

use std::time::Instant;

use rand::Rng;
use tracing::info;

use crate::Timing;
use crate::config::{Params, Strategy};
use crate::error::Result;
use crate::grid::Grid;

/// What a generation run did.
#[derive(Clone, Debug)]
pub struct Report {
    pub strategy: Strategy,
    /// Land count after every pass of each expansion loop, one entry per loop.
    pub expansions: Vec<Vec<usize>>,
    /// Final number of land tiles.
    pub land: usize,
    pub timings: Vec<Timing>,
}

fn elapsed_ms(t: Instant) -> f64 {
    t.elapsed().as_secs_f64() * 1000.0
}

/// Regenerates all terrain of `grid` in place.
///
/// Parameters are checked before anything is touched. If this returns an
/// error after validation (a stalled expansion) the grid is left half-built
/// and should be discarded.
pub fn run<R: Rng>(grid: &mut Grid, params: &Params, rng: &mut R) -> Result<Report> {
    params.validate()?;
    let mut timings = Vec::new();

    let t = Instant::now();
    let adj = grid.adjacency();
    timings.push(Timing {
        name: "adjacency",
        ms: elapsed_ms(t),
    });

    let target = params.land_fraction * grid.len() as f64;
    let mut expansions = Vec::new();

    // 1. Seed land
    let t = Instant::now();
    match params.strategy {
        Strategy::Archipelago => archipelago::seed_islands(grid, &adj, params.water_fraction, rng),
        Strategy::Continents => continents::seed_continents(grid, &adj, params, rng),
    }
    timings.push(Timing {
        name: "seed_land",
        ms: elapsed_ms(t),
    });

    // 2. Grow coastlines to the target; continents get reshaped once and
    //    regrown.
    let t = Instant::now();
    expansions.push(passes::expand_until(grid, &adj, target, rng)?);
    if params.strategy == Strategy::Continents {
        passes::rand_step(grid, &adj, rng);
        expansions.push(passes::expand_until(grid, &adj, target, rng)?);
    }
    timings.push(Timing {
        name: "expand",
        ms: elapsed_ms(t),
    });

    // 3. Finishing passes
    let t = Instant::now();
    passes::coast_and_sea(grid, &adj);
    passes::draw_land(grid);
    timings.push(Timing {
        name: "finish",
        ms: elapsed_ms(t),
    });

    let land = grid.land_count();
    info!(
        strategy = %params.strategy,
        width = grid.width(),
        height = grid.height(),
        wrap = %grid.wrap(),
        land,
        target,
        passes = expansions.iter().map(Vec::len).sum::<usize>(),
        "generated map"
    );

    Ok(Report {
        strategy: params.strategy,
        expansions,
        land,
        timings,
    })
}
