//! Internal coordinate system of the hex tiling.
//!
//! One unit of `y` is the height of a tile; a tile is `HEX_WIDTH` (√3) units
//! wide. Tiles have flat left/right sides and pointed tops, and odd rows are
//! pushed right by half a tile (brick layout):
//!
//! ```text
//!  /\  /\  /\
//! |  ||  ||  |     row 0
//!  \/\/\/\/\/\
//!   |  ||  ||  |   row 1
//!    \/  \/  \/
//! ```
//!
//! Consecutive rows overlap by a quarter of a tile height, so row `ty` starts
//! at `y = 0.75 * ty`.

use serde::{Deserialize, Serialize};

/// Width of one tile in internal units.
pub const HEX_WIDTH: f64 = 1.732_050_807_568_877_2;
const HALF_WIDTH: f64 = HEX_WIDTH / 2.0;
const INV_HALF_WIDTH: f64 = 2.0 / HEX_WIDTH;

/// Vertical distance between the tops of consecutive rows.
pub const ROW_STEP: f64 = 0.75;

/// Column/row of a tile. Not necessarily on the grid until canonicalized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileIndex {
    pub x: i32,
    pub y: i32,
}

impl TileIndex {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn is_odd_row(self) -> bool {
        self.y & 1 == 1
    }
}

impl From<(i32, i32)> for TileIndex {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// A point in internal (unscaled) coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanarPoint {
    pub x: f64,
    pub y: f64,
}

impl PlanarPoint {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Mathematical modulus: the result has the sign of `m`, unlike `%`.
#[inline]
pub fn modulo(n: f64, m: f64) -> f64 {
    let r = n.rem_euclid(m);
    // rem_euclid can round up to exactly `m` for tiny negative inputs.
    if r >= m { 0.0 } else { r }
}

/// Top-left corner of the bounding box of tile `index`.
#[inline]
pub fn index_to_origin(index: TileIndex) -> PlanarPoint {
    let shift = if index.is_odd_row() { HALF_WIDTH } else { 0.0 };
    PlanarPoint {
        x: HEX_WIDTH * index.x as f64 + shift,
        y: ROW_STEP * index.y as f64,
    }
}

/// Center of tile `index`.
#[inline]
pub fn tile_centroid(index: TileIndex) -> PlanarPoint {
    let origin = index_to_origin(index);
    PlanarPoint {
        x: origin.x + HALF_WIDTH,
        y: origin.y + 0.5,
    }
}

/// Size of a `width` x `height` grid in internal units.
pub fn internal_size(width: usize, height: usize) -> (f64, f64) {
    let w = HEX_WIDTH * width as f64;
    let h = ROW_STEP * (height.max(1) - 1) as f64 + 1.0;
    (w, h)
}

/// Index of the tile containing `p`. Total over all finite reals.
///
/// The plane is cut into quarter-height strips and half-width columns. Strips
/// 1,2 (mod 6) lie entirely inside an even row and strips 4,5 inside an odd
/// row ("box" strips). Strips 0 and 3 contain the slanted edges between rows;
/// a point there is first pushed into the box strip above or below it, then
/// resolved like any other box point.
///
/// Indices past the `i32` range saturate to `i32::MIN`/`i32::MAX`, which no
/// grid holds, so a far-away point canonicalizes to off-grid on a flat map.
pub fn point_to_index(p: PlanarPoint) -> TileIndex {
    let mut quarter_row = (4.0 * p.y).floor() as i64;
    let half_col = (INV_HALF_WIDTH * p.x).floor() as i64;

    let slant = quarter_row.rem_euclid(6);
    if slant == 0 || slant == 3 {
        let fx = INV_HALF_WIDTH * p.x - half_col as f64;
        let fy = 4.0 * p.y - quarter_row as f64;
        let even_col = half_col & 1 == 0;
        // Strip 0 is the top of an even row, strip 3 the top of an odd row;
        // the edge runs the other way in odd half-columns.
        let below = if (slant == 0) == even_col {
            fx + fy > 1.0
        } else {
            fy > fx
        };
        quarter_row = quarter_row.saturating_add(if below { 1 } else { -1 });
    }

    let band = quarter_row.div_euclid(6).saturating_mul(2);
    match quarter_row.rem_euclid(6) {
        1 | 2 => TileIndex::new(saturate(half_col >> 1), saturate(band)),
        _ => TileIndex::new(saturate(half_col.saturating_sub(1) >> 1), saturate(band.saturating_add(1))),
    }
}

#[inline]
fn saturate(n: i64) -> i32 {
    n.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}
