use rayon::prelude::*;

use crate::geometry::{PlanarPoint, TileIndex, point_to_index};
use crate::grid::Grid;

/// Pixels outside every tile (the notches along the top and bottom edge of a
/// non-wrapping grid).
const BACKGROUND: [u8; 4] = [12, 14, 20, 255];

/// How much tile borders are darkened, 0 = not at all.
const BORDER_SHADE: f32 = 0.35;

#[inline]
fn darken(c: [u8; 4], t: f32) -> [u8; 4] {
    let k = 1.0 - t.clamp(0.0, 1.0);
    [
        (c[0] as f32 * k).round() as u8,
        (c[1] as f32 * k).round() as u8,
        (c[2] as f32 * k).round() as u8,
        c[3],
    ]
}

/// Preview image size for `grid` at `pixels_per_unit`.
pub fn image_size(grid: &Grid, pixels_per_unit: f64) -> (usize, usize) {
    let (w, h) = grid.internal_size();
    (
        (w * pixels_per_unit).ceil().max(1.0) as usize,
        (h * pixels_per_unit).ceil().max(1.0) as usize,
    )
}

/// `preferred` pixels per unit, lowered as far as needed to keep the preview
/// of `grid` within about `max_pixels` pixels.
pub fn fit_scale(grid: &Grid, preferred: f64, max_pixels: usize) -> f64 {
    let (w, h) = grid.internal_size();
    preferred.min((max_pixels as f64 / (w * h)).sqrt())
}

/// Rasterises the grid as RGBA, one terrain colour per tile with darkened
/// borders. Returns `(pixels, width, height)`.
pub fn render_map(grid: &Grid, pixels_per_unit: f64) -> (Vec<u8>, usize, usize) {
    let (w, h) = image_size(grid, pixels_per_unit);
    let mut rgba = vec![0u8; w * h * 4];
    let tile_at = |px: usize, py: usize| -> Option<TileIndex> {
        let p = PlanarPoint::new(
            (px as f64 + 0.5) / pixels_per_unit,
            (py as f64 + 0.5) / pixels_per_unit,
        );
        grid.canonicalize(point_to_index(p))
    };

    rgba.par_chunks_mut(w * 4)
        .enumerate()
        .for_each(|(y, row)| {
            for x in 0..w {
                let color = match tile_at(x, y) {
                    None => BACKGROUND,
                    Some(index) => {
                        let base = grid.terrain(index).unwrap_or_default().color();
                        let edge = (x + 1 < w && tile_at(x + 1, y) != Some(index))
                            || (y + 1 < h && tile_at(x, y + 1) != Some(index));
                        if edge { darken(base, BORDER_SHADE) } else { base }
                    }
                };
                row[x * 4..x * 4 + 4].copy_from_slice(&color);
            }
        });

    (rgba, w, h)
}
