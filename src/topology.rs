//! Wrap modes and hex adjacency.

use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Error;
pub use crate::geometry::TileIndex;

/// How indices that fall off one edge of the grid re-enter it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Wrap {
    /// No wrapping at all.
    #[default]
    Flat,
    /// E-W wrapping; the poles are edges.
    Cylinder,
    /// E-W and N-S wrapping.
    Torus,
    /// E-W wrapping with a half twist: crossing the seam mirrors the row.
    MobiusStrip,
    /// Möbius strip whose rows also wrap N-S.
    KleinBottle,
}

impl Wrap {
    pub const ALL: [Wrap; 5] = [
        Wrap::Flat,
        Wrap::Cylinder,
        Wrap::Torus,
        Wrap::MobiusStrip,
        Wrap::KleinBottle,
    ];

    /// Persisted tag.
    pub fn tag(self) -> &'static str {
        match self {
            Wrap::Flat => "FLAT",
            Wrap::Cylinder => "CYLINDER",
            Wrap::Torus => "TORUS",
            Wrap::MobiusStrip => "MOBIUS_STRIP",
            Wrap::KleinBottle => "KLEIN_BOTTLE",
        }
    }

    /// Whether columns wrap, i.e. whether a viewport may scroll forever E-W.
    pub fn wraps_horizontally(self) -> bool {
        !matches!(self, Wrap::Flat)
    }
}

impl fmt::Display for Wrap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Wrap {
    type Err = Error;

    /// Accepts persisted tags as well as lower/kebab-case spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        Wrap::ALL
            .into_iter()
            .find(|w| w.tag() == normalized)
            .ok_or_else(|| Error::UnknownWrap(s.to_string()))
    }
}

/// Neighbor slots, in the fixed order every neighbor array uses:
///
/// ```text
///   NW NE
/// W   .   E
///   SW SE
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    NorthWest,
    NorthEast,
    West,
    East,
    SouthWest,
    SouthEast,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::NorthWest,
        Direction::NorthEast,
        Direction::West,
        Direction::East,
        Direction::SouthWest,
        Direction::SouthEast,
    ];

    /// Index offset from a tile in an even or odd row.
    #[inline]
    pub fn offset(self, odd_row: bool) -> (i32, i32) {
        // Odd rows sit half a tile to the right, so their diagonals do too.
        let lean = if odd_row { 0 } else { -1 };
        match self {
            Direction::NorthWest => (lean, -1),
            Direction::NorthEast => (lean + 1, -1),
            Direction::West => (-1, 0),
            Direction::East => (1, 0),
            Direction::SouthWest => (lean, 1),
            Direction::SouthEast => (lean + 1, 1),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::NorthWest => Direction::SouthEast,
            Direction::NorthEast => Direction::SouthWest,
            Direction::West => Direction::East,
            Direction::East => Direction::West,
            Direction::SouthWest => Direction::NorthEast,
            Direction::SouthEast => Direction::NorthWest,
        }
    }
}

/// Maps any index onto the grid, or `None` if it is off the grid.
///
/// Idempotent: a canonical index always canonicalizes to itself.
pub fn canonicalize(index: TileIndex, width: usize, height: usize, wrap: Wrap) -> Option<TileIndex> {
    let (w, h) = (width as i64, height as i64);
    let (x, y) = (index.x as i64, index.y as i64);
    let in_rows = (0..h).contains(&y);

    let (cx, cy) = match wrap {
        Wrap::Flat => {
            if !(in_rows && (0..w).contains(&x)) {
                return None;
            }
            (x, y)
        }
        Wrap::Cylinder => {
            if !in_rows {
                return None;
            }
            (x.rem_euclid(w), y)
        }
        Wrap::Torus => (x.rem_euclid(w), y.rem_euclid(h)),
        Wrap::MobiusStrip => {
            if !in_rows {
                return None;
            }
            (x.rem_euclid(w), twist(x, y, w, h))
        }
        Wrap::KleinBottle => (x.rem_euclid(w), twist(x, y.rem_euclid(h), w, h)),
    };
    Some(TileIndex::new(cx as i32, cy as i32))
}

/// Mirrors the row when `x` lies on the far side of the half twist.
#[inline]
fn twist(x: i64, y: i64, w: i64, h: i64) -> i64 {
    if x.rem_euclid(2 * w) < w { y } else { h - 1 - y }
}

fn raw_neighbors(center: TileIndex, width: usize, height: usize, wrap: Wrap) -> [Option<TileIndex>; 6] {
    let odd = center.is_odd_row();
    Direction::ALL.map(|dir| {
        let (dx, dy) = dir.offset(odd);
        canonicalize(TileIndex::new(center.x + dx, center.y + dy), width, height, wrap)
    })
}

/// The six neighbors of `index`, ordered as [`Direction::ALL`].
///
/// Off-grid slots are `None`. Where a seam does not line up with the brick
/// offset (a half twist with an even number of rows, or N-S wrapping with an
/// odd number of rows), a link across the seam is only kept if the tile on the
/// other side links back; the rest are reported as `None`. This keeps the
/// relation symmetric for every wrap mode and grid size.
pub fn neighbors(index: TileIndex, width: usize, height: usize, wrap: Wrap) -> [Option<TileIndex>; 6] {
    let Some(center) = canonicalize(index, width, height, wrap) else {
        return [None; 6];
    };
    let mut out = raw_neighbors(center, width, height, wrap);
    let odd = center.is_odd_row();
    for (slot, dir) in Direction::ALL.into_iter().enumerate() {
        let Some(other) = out[slot] else {
            continue;
        };
        let (dx, dy) = dir.offset(odd);
        if other == TileIndex::new(center.x + dx, center.y + dy) {
            continue;
        }
        if !raw_neighbors(other, width, height, wrap).contains(&Some(center)) {
            out[slot] = None;
        }
    }
    out
}

/// Precomputed neighbor slots for every tile of a grid, by flat row-major
/// index. Built once per generation run instead of re-resolving wraps in
/// every cellular-automaton pass.
#[derive(Clone, Debug)]
pub struct AdjacencyTable {
    links: Vec<[Option<usize>; 6]>,
}

impl AdjacencyTable {
    pub fn new(w: usize, h: usize, wrap: Wrap) -> Self {
        let links = (0..w * h)
            .into_par_iter()
            .map(|i| {
                let index = TileIndex::new((i % w) as i32, (i / w) as i32);
                neighbors(index, w, h, wrap).map(|n| n.map(|t| t.y as usize * w + t.x as usize))
            })
            .collect();
        Self { links }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Neighbor slots of flat index `i`.
    #[inline]
    pub fn slots(&self, i: usize) -> &[Option<usize>; 6] {
        &self.links[i]
    }

    /// On-grid neighbors of flat index `i`.
    #[inline]
    pub fn of(&self, i: usize) -> impl Iterator<Item = usize> + '_ {
        self.links[i].iter().flatten().copied()
    }
}
