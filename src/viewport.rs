//! The visible window over the map.
//!
//! A viewport is a plain value: the renderer holds it and replaces it on
//! every pan, zoom or resize. Positions are internal coordinates; `scale` is
//! device pixels per internal unit.

use serde::{Deserialize, Serialize};

use crate::geometry::{PlanarPoint, TileIndex, modulo, point_to_index};

/// Upper zoom bound, pixels per internal unit.
pub const MAX_SCALE: f64 = 300.0;

/// Scale a fresh board opens at.
pub const DEFAULT_SCALE: f64 = 130.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub left_x: f64,
    pub top_y: f64,
    pub scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            left_x: 0.0,
            top_y: 0.0,
            scale: DEFAULT_SCALE,
        }
    }
}

/// On-screen window size plus the extent of the grid it looks at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub window_width: f64,
    pub window_height: f64,
    pub grid_width: f64,
    pub grid_height: f64,
    pub wrap: bool,
}

impl Bounds {
    /// Smallest scale at which the grid still fills the window vertically.
    #[inline]
    pub fn min_scale(&self) -> f64 {
        self.window_height / self.grid_height
    }
}

/// Like `f64::clamp`, but `lo` wins when the range is empty or `n` is NaN.
#[inline]
fn clamp_low_first(n: f64, lo: f64, hi: f64) -> f64 {
    if n.is_nan() || n < lo {
        lo
    } else if n > hi {
        hi.max(lo)
    } else {
        n
    }
}

impl Viewport {
    pub fn new(left_x: f64, top_y: f64, scale: f64) -> Self {
        Self { left_x, top_y, scale }
    }

    /// Pulls a requested viewport back inside the allowed range. Idempotent.
    pub fn clamp(self, bounds: &Bounds) -> Viewport {
        let scale = clamp_low_first(self.scale, bounds.min_scale(), MAX_SCALE);
        let left_x = if bounds.wrap {
            modulo(self.left_x, bounds.grid_width)
        } else {
            self.left_x
        };
        let top_y = clamp_low_first(self.top_y, 0.0, bounds.grid_height - bounds.window_height / scale);
        Viewport { left_x, top_y, scale }
    }

    /// Internal coordinates under window pixel `(px, py)`.
    #[inline]
    pub fn window_to_internal(&self, px: f64, py: f64) -> PlanarPoint {
        PlanarPoint::new(self.left_x + px / self.scale, self.top_y + py / self.scale)
    }

    /// Window pixel of internal point `p`.
    #[inline]
    pub fn internal_to_window(&self, p: PlanarPoint) -> (f64, f64) {
        ((p.x - self.left_x) * self.scale, (p.y - self.top_y) * self.scale)
    }

    /// Zooms by `delta` in log-space, keeping the internal point under window
    /// pixel `cursor` fixed.
    pub fn zoom_at(self, cursor: (f64, f64), delta: f64, bounds: &Bounds) -> Viewport {
        let anchor = self.window_to_internal(cursor.0, cursor.1);
        let scale = clamp_low_first((self.scale.ln() + delta).exp(), bounds.min_scale(), MAX_SCALE);
        Viewport {
            left_x: anchor.x - cursor.0 / scale,
            top_y: anchor.y - cursor.1 / scale,
            scale,
        }
        .clamp(bounds)
    }

    /// Moves the window by `(dx, dy)` internal units.
    pub fn pan(self, dx: f64, dy: f64, bounds: &Bounds) -> Viewport {
        Viewport {
            left_x: self.left_x + dx,
            top_y: self.top_y + dy,
            scale: self.scale,
        }
        .clamp(bounds)
    }

    /// Inclusive range of tile indices a renderer has to draw, padded by one
    /// tile on every side. Indices are not canonicalized; columns past the
    /// grid edge are wrap copies for the renderer to resolve.
    pub fn visible_tile_range(&self, window_width: f64, window_height: f64) -> (TileIndex, TileIndex) {
        let top_left = point_to_index(PlanarPoint::new(self.left_x, self.top_y));
        let bottom_right = point_to_index(self.window_to_internal(window_width, window_height));
        (
            TileIndex::new(top_left.x.saturating_sub(1), top_left.y.saturating_sub(1)),
            TileIndex::new(bottom_right.x.saturating_add(1), bottom_right.y.saturating_add(1)),
        )
    }
}
