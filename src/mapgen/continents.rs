use rand::Rng;

use crate::config::Params;
use crate::grid::Grid;
use crate::terrain::Terrain;
use crate::topology::AdjacencyTable;

/// Where a cluster's points may land, as `origin + U[0, size) * spread` per
/// axis, in fractions of the grid size.
struct Cluster {
    x: (f64, f64),
    y: (f64, f64),
}

/// Left of center, rows 1/8..6/8.
const WEST: Cluster = Cluster {
    x: (1.0 / 8.0, 1.0 / 6.0),
    y: (1.0 / 8.0, 5.0 / 8.0),
};

/// Right of center, rows 2/8..7/8.
const EAST: Cluster = Cluster {
    x: (1.0 / 2.0, 5.0 / 16.0),
    y: (2.0 / 8.0, 5.0 / 8.0),
};

/// Clears the grid to water and raises two clusters of seed points, the
/// eastern one with more points than the western one.
pub fn seed_continents<R: Rng>(grid: &mut Grid, adj: &AdjacencyTable, params: &Params, rng: &mut R) {
    grid.fill(Terrain::Water);
    scatter(grid, adj, &WEST, params.west_points, params.neighbor_land_chance, rng);
    scatter(grid, adj, &EAST, params.east_points, params.neighbor_land_chance, rng);
}

fn scatter<R: Rng>(
    grid: &mut Grid,
    adj: &AdjacencyTable,
    cluster: &Cluster,
    points: usize,
    chance: f64,
    rng: &mut R,
) {
    let (w, h) = (grid.width(), grid.height());
    for _ in 0..points {
        let rx = rng.gen_range(0..w) as f64;
        let ry = rng.gen_range(0..h) as f64;
        let x = ((w as f64 * cluster.x.0 + rx * cluster.x.1).round() as usize).min(w - 1);
        let y = ((h as f64 * cluster.y.0 + ry * cluster.y.1).round() as usize).min(h - 1);

        let i = grid.idx(x, y);
        grid.tiles_mut()[i].terrain = Terrain::Land;
        for j in adj.of(i) {
            if rng.gen_bool(chance) {
                grid.tiles_mut()[j].terrain = Terrain::Land;
            }
        }
    }
}
