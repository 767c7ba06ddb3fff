use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Landmass generation strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Random noise smoothed into island blobs.
    Archipelago,
    /// Two seeded landmasses, the eastern one larger.
    #[default]
    Continents,
}

impl Strategy {
    /// Land fraction the map editor asks for with this strategy.
    pub fn default_land_fraction(self) -> f64 {
        match self {
            Strategy::Archipelago => 0.2,
            Strategy::Continents => 0.25,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Archipelago => "archipelago",
            Strategy::Continents => "continents",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "archipelago" => Ok(Strategy::Archipelago),
            "continents" => Ok(Strategy::Continents),
            other => Err(Error::InvalidParameter {
                name: "strategy",
                reason: format!("unknown strategy {other:?}"),
            }),
        }
    }
}

/// Generation parameters. Every field has a default, so a partial JSON object
/// is a valid params file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    pub strategy: Strategy,
    /// Target share of tiles that end up as land.
    pub land_fraction: f64,

    // Archipelago
    /// Chance that a tile starts out as water before smoothing.
    pub water_fraction: f64,

    // Continents
    pub west_points: usize,
    pub east_points: usize,
    /// Chance that each neighbor of a seed point is raised as well.
    pub neighbor_land_chance: f64,
}

impl Default for Params {
    fn default() -> Self {
        Self::for_strategy(Strategy::default())
    }
}

impl Params {
    pub fn for_strategy(strategy: Strategy) -> Self {
        Self {
            strategy,
            land_fraction: strategy.default_land_fraction(),
            water_fraction: 0.7,
            west_points: 15,
            east_points: 30,
            neighbor_land_chance: 0.6,
        }
    }

    /// Rejects parameters that could never finish generating.
    ///
    /// A land fraction of 1 or more is refused outright: the expansion rule
    /// only converts water with at least two land neighbors, so a full map is
    /// not reachable in general. Fractions at or below 0 are fine and make the
    /// expansion loops return immediately.
    pub fn validate(&self) -> Result<()> {
        if !self.land_fraction.is_finite() || self.land_fraction >= 1.0 {
            return Err(Error::InvalidLandFraction(self.land_fraction));
        }
        probability("water_fraction", self.water_fraction)?;
        probability("neighbor_land_chance", self.neighbor_land_chance)?;
        Ok(())
    }
}

fn probability(name: &'static str, p: f64) -> Result<()> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(Error::InvalidParameter {
            name,
            reason: format!("{p} is not a probability"),
        })
    }
}
