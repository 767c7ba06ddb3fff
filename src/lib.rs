pub mod board;
pub mod codec;
pub mod config;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod mapgen;
pub mod render;
pub mod rng;
pub mod save;
pub mod terrain;
pub mod topology;
pub mod viewport;

use std::time::Instant;

use serde::Serialize;

pub use board::Board;
pub use config::{Params, Strategy};
pub use error::{Error, Result};
pub use geometry::{PlanarPoint, TileIndex};
pub use grid::{Grid, Tile};
pub use mapgen::Report;
pub use terrain::Terrain;
pub use topology::Wrap;
pub use viewport::Viewport;

#[derive(Clone, Debug, Serialize)]
pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

/// Seeded one-shot generation: a fresh `w` x `h` grid with terrain from
/// `params`. The same seed and inputs always give the same grid.
pub fn generate(seed: u64, w: usize, h: usize, wrap: Wrap, params: &Params) -> Result<(Grid, Report)> {
    let total_start = Instant::now();

    let mut grid = Grid::new(w, h, wrap)?;
    let mut rng = rng::stage_rng(seed, rng::SALT_MAPGEN);
    let mut report = mapgen::run(&mut grid, params, &mut rng)?;

    report.timings.push(Timing {
        name: "TOTAL",
        ms: total_start.elapsed().as_secs_f64() * 1000.0,
    });
    Ok((grid, report))
}
