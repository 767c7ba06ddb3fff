use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::geometry;
use crate::terrain::Terrain;
use crate::topology::{self, AdjacencyTable, TileIndex, Wrap};

/// Largest accepted width or height.
pub const MAX_SIDE: usize = 1 << 15;

/// One map cell. Only `terrain` is interpreted here; any other fields a
/// caller attaches (units, visibility, ...) ride along untouched through
/// save/load.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub terrain: Terrain,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Tile {
    pub fn new(terrain: Terrain) -> Self {
        Self {
            terrain,
            extra: Map::new(),
        }
    }
}

/// Row-major flat grid of tiles with a wrap mode.
/// `tiles.len() == w * h` holds for every constructed grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    w: usize,
    h: usize,
    wrap: Wrap,
    tiles: Vec<Tile>,
}

fn check_dimensions(w: usize, h: usize) -> Result<()> {
    if w == 0 || h == 0 || w > MAX_SIDE || h > MAX_SIDE {
        return Err(Error::InvalidDimensions {
            width: w,
            height: h,
            max: MAX_SIDE,
        });
    }
    Ok(())
}

impl Grid {
    /// A fresh all-water grid.
    pub fn new(w: usize, h: usize, wrap: Wrap) -> Result<Self> {
        check_dimensions(w, h)?;
        Ok(Self {
            w,
            h,
            wrap,
            tiles: vec![Tile::new(Terrain::Water); w * h],
        })
    }

    /// Adopts an existing row-major tile array.
    pub fn from_tiles(w: usize, h: usize, wrap: Wrap, tiles: Vec<Tile>) -> Result<Self> {
        check_dimensions(w, h)?;
        if tiles.len() != w * h {
            return Err(Error::TileCount {
                width: w,
                height: h,
                expected: w * h,
                actual: tiles.len(),
            });
        }
        Ok(Self { w, h, wrap, tiles })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.w
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.h
    }

    #[inline]
    pub fn wrap(&self) -> Wrap {
        self.wrap
    }

    pub fn set_wrap(&mut self, wrap: Wrap) {
        self.wrap = wrap;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.w && y < self.h);
        y * self.w + x
    }

    /// Index of the tile stored at flat position `i`.
    #[inline]
    pub fn position(&self, i: usize) -> TileIndex {
        TileIndex::new((i % self.w) as i32, (i / self.w) as i32)
    }

    #[inline]
    pub fn canonicalize(&self, index: TileIndex) -> Option<TileIndex> {
        topology::canonicalize(index, self.w, self.h, self.wrap)
    }

    /// Flat position of `index` after wrapping, if it is on the grid.
    #[inline]
    pub fn flat_index(&self, index: TileIndex) -> Option<usize> {
        self.canonicalize(index)
            .map(|t| self.idx(t.x as usize, t.y as usize))
    }

    pub fn tile(&self, index: TileIndex) -> Option<&Tile> {
        self.flat_index(index).map(|i| &self.tiles[i])
    }

    pub fn tile_mut(&mut self, index: TileIndex) -> Option<&mut Tile> {
        let i = self.flat_index(index)?;
        Some(&mut self.tiles[i])
    }

    pub fn terrain(&self, index: TileIndex) -> Option<Terrain> {
        self.tile(index).map(|t| t.terrain)
    }

    /// Returns false if `index` is off the grid.
    pub fn set_terrain(&mut self, index: TileIndex, terrain: Terrain) -> bool {
        match self.tile_mut(index) {
            Some(tile) => {
                tile.terrain = terrain;
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    #[inline]
    pub fn tiles_mut(&mut self) -> &mut [Tile] {
        &mut self.tiles
    }

    pub fn into_tiles(self) -> Vec<Tile> {
        self.tiles
    }

    /// All tiles with their canonical indices, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (TileIndex, &Tile)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, t)| (self.position(i), t))
    }

    pub fn neighbors(&self, index: TileIndex) -> [Option<TileIndex>; 6] {
        topology::neighbors(index, self.w, self.h, self.wrap)
    }

    pub fn adjacency(&self) -> AdjacencyTable {
        AdjacencyTable::new(self.w, self.h, self.wrap)
    }

    /// Grid extent in internal coordinates.
    pub fn internal_size(&self) -> (f64, f64) {
        geometry::internal_size(self.w, self.h)
    }

    pub fn fill(&mut self, terrain: Terrain) {
        for tile in &mut self.tiles {
            tile.terrain = terrain;
        }
    }

    pub fn count(&self, terrain: Terrain) -> usize {
        self.tiles.iter().filter(|t| t.terrain == terrain).count()
    }

    /// Number of tiles whose terrain is land of any kind.
    pub fn land_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.terrain.is_land()).count()
    }

    /// Brush stroke: paints `index` and every tile within `radius - 1`
    /// neighbor steps of it. Returns how many tiles were painted.
    pub fn paint(&mut self, index: TileIndex, terrain: Terrain, radius: usize) -> usize {
        let Some(start) = self.canonicalize(index) else {
            return 0;
        };
        let mut seen = vec![false; self.tiles.len()];
        let mut queue = VecDeque::from([(start, 1usize)]);
        seen[self.idx(start.x as usize, start.y as usize)] = true;
        let mut painted = 0;

        while let Some((at, ring)) = queue.pop_front() {
            let i = self.idx(at.x as usize, at.y as usize);
            self.tiles[i].terrain = terrain;
            painted += 1;
            if ring >= radius {
                continue;
            }
            for next in self.neighbors(at).into_iter().flatten() {
                let j = self.idx(next.x as usize, next.y as usize);
                if !seen[j] {
                    seen[j] = true;
                    queue.push_back((next, ring + 1));
                }
            }
        }
        painted
    }
}
