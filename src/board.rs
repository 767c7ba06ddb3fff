//! A grid together with the window looking at it.
//!
//! This is the surface a renderer or game layer drives: it turns input-style
//! requests (arrow keys, drags, wheel ticks, resizes) into clamped viewports
//! and answers the questions a renderer asks about what is on screen.

use rand::Rng;

use crate::config::Params;
use crate::error::Result;
use crate::geometry::{TileIndex, point_to_index};
use crate::grid::{Grid, Tile};
use crate::mapgen::{self, Report};
use crate::save;
use crate::terrain::Terrain;
use crate::topology::Wrap;
use crate::viewport::{Bounds, DEFAULT_SCALE, Viewport};

/// Log-scale zoom per unit of wheel delta.
pub const WHEEL_ZOOM: f64 = 0.007;

/// Wheel delta a single page-up/page-down key press stands for.
pub const PAGE_ZOOM_DELTA: f64 = 10.0;

#[derive(Clone, Debug)]
pub struct Board {
    grid: Grid,
    view: Viewport,
    window: (f64, f64),
}

impl Board {
    pub fn new(grid: Grid, window_width: f64, window_height: f64) -> Self {
        let mut board = Self {
            grid,
            view: Viewport::default(),
            window: (window_width, window_height),
        };
        board.set_view(Viewport::default());
        board
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable access for painting and other tile edits. Dimensions and wrap
    /// mode can't change through this, so the viewport stays valid.
    pub fn tiles_mut(&mut self) -> &mut [Tile] {
        self.grid.tiles_mut()
    }

    pub fn paint(&mut self, index: TileIndex, terrain: Terrain, radius: usize) -> usize {
        self.grid.paint(index, terrain, radius)
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    pub fn viewport(&self) -> Viewport {
        self.view
    }

    pub fn window(&self) -> (f64, f64) {
        self.window
    }

    pub fn bounds(&self) -> Bounds {
        let (grid_width, grid_height) = self.grid.internal_size();
        Bounds {
            window_width: self.window.0,
            window_height: self.window.1,
            grid_width,
            grid_height,
            wrap: self.grid.wrap().wraps_horizontally(),
        }
    }

    /// Requests a viewport; the stored one is the clamped version.
    pub fn set_view(&mut self, view: Viewport) -> Viewport {
        self.view = view.clamp(&self.bounds());
        self.view
    }

    pub fn resize(&mut self, window_width: f64, window_height: f64) -> Viewport {
        self.window = (window_width, window_height);
        self.set_view(self.view)
    }

    pub fn set_wrap(&mut self, wrap: Wrap) -> Viewport {
        self.grid.set_wrap(wrap);
        self.set_view(self.view)
    }

    /// Moves by whole internal units, the way the arrow keys do.
    pub fn pan_units(&mut self, dx: f64, dy: f64) -> Viewport {
        self.view = self.view.pan(dx, dy, &self.bounds());
        self.view
    }

    /// Drag panning. `start` is the viewport when the button went down and
    /// `(dx, dy)` the pointer travel in window pixels since then; the map
    /// follows the pointer.
    pub fn drag(&mut self, start: Viewport, dx: f64, dy: f64) -> Viewport {
        self.set_view(Viewport {
            left_x: start.left_x - dx / start.scale,
            top_y: start.top_y - dy / start.scale,
            scale: start.scale,
        })
    }

    /// Wheel zoom anchored at the cursor. Negative `delta_y` zooms in.
    pub fn wheel(&mut self, cursor: (f64, f64), delta_y: f64) -> Viewport {
        self.view = self.view.zoom_at(cursor, -delta_y * WHEEL_ZOOM, &self.bounds());
        self.view
    }

    fn centre(&self) -> (f64, f64) {
        (self.window.0 / 2.0, self.window.1 / 2.0)
    }

    pub fn zoom_in(&mut self) -> Viewport {
        self.wheel(self.centre(), -PAGE_ZOOM_DELTA)
    }

    pub fn zoom_out(&mut self) -> Viewport {
        self.wheel(self.centre(), PAGE_ZOOM_DELTA)
    }

    /// Back to the top-left corner at the default scale.
    pub fn reset_zoom(&mut self) -> Viewport {
        self.set_view(Viewport::new(0.0, 0.0, DEFAULT_SCALE))
    }

    /// Top-left corner, zoomed out until the grid just fills the window.
    pub fn zoom_out_fully(&mut self) -> Viewport {
        self.set_view(Viewport::new(0.0, 0.0, 0.0))
    }

    /// The on-grid tile under window pixel `(px, py)`.
    pub fn tile_at(&self, px: f64, py: f64) -> Option<TileIndex> {
        self.grid
            .canonicalize(point_to_index(self.view.window_to_internal(px, py)))
    }

    /// Every tile a renderer has to draw, as `(drawn_at, tile)` pairs:
    /// `drawn_at` is the unwrapped index that gives the on-screen position,
    /// `tile` the canonical index whose contents go there. Rows off the top
    /// or bottom of the grid are skipped.
    pub fn visible_tiles(&self) -> Vec<(TileIndex, TileIndex)> {
        let (top_left, bottom_right) = self.view.visible_tile_range(self.window.0, self.window.1);
        let rows = top_left.y.max(0)..=bottom_right.y.min(self.grid.height() as i32 - 1);
        let mut out = Vec::new();
        for ty in rows {
            for tx in top_left.x..=bottom_right.x {
                let drawn = TileIndex::new(tx, ty);
                if let Some(tile) = self.grid.canonicalize(drawn) {
                    out.push((drawn, tile));
                }
            }
        }
        out
    }

    /// Generates a new map of the same size and wrap mode. The current grid
    /// is only replaced once generation succeeds.
    pub fn regenerate<R: Rng>(&mut self, params: &Params, rng: &mut R) -> Result<Report> {
        let mut grid = Grid::new(self.grid.width(), self.grid.height(), self.grid.wrap())?;
        let report = mapgen::run(&mut grid, params, rng)?;
        self.grid = grid;
        self.set_view(self.view);
        Ok(report)
    }

    pub fn save(&self) -> Result<String> {
        save::save(&self.grid)
    }

    /// Replaces the grid with a saved one. A save that fails to load leaves
    /// the board untouched.
    pub fn load(&mut self, text: &str) -> Result<()> {
        self.grid = save::load(text)?;
        self.set_view(self.view);
        Ok(())
    }
}
