use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Terrain label of a tile.
///
/// `Water` and `Land` only exist while a map is being generated; the finishing
/// passes turn them into the playable water and land types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Terrain {
    #[default]
    Water,
    Land,

    Mountain,
    Volcano,
    FloodPlain,
    Grassland,
    BonusGrassland,
    Plains,
    Desert,
    Tundra,

    Ocean,
    Sea,
    Coast,
    FreshwaterLake,
}

impl Terrain {
    pub const ALL: [Terrain; 14] = [
        Terrain::Water,
        Terrain::Land,
        Terrain::Mountain,
        Terrain::Volcano,
        Terrain::FloodPlain,
        Terrain::Grassland,
        Terrain::BonusGrassland,
        Terrain::Plains,
        Terrain::Desert,
        Terrain::Tundra,
        Terrain::Ocean,
        Terrain::Sea,
        Terrain::Coast,
        Terrain::FreshwaterLake,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Terrain::Water => "WATER",
            Terrain::Land => "LAND",
            Terrain::Mountain => "MOUNTAIN",
            Terrain::Volcano => "VOLCANO",
            Terrain::FloodPlain => "FLOOD_PLAIN",
            Terrain::Grassland => "GRASSLAND",
            Terrain::BonusGrassland => "BONUS_GRASSLAND",
            Terrain::Plains => "PLAINS",
            Terrain::Desert => "DESERT",
            Terrain::Tundra => "TUNDRA",
            Terrain::Ocean => "OCEAN",
            Terrain::Sea => "SEA",
            Terrain::Coast => "COAST",
            Terrain::FreshwaterLake => "FRESHWATER_LAKE",
        }
    }

    pub fn is_water(self) -> bool {
        matches!(
            self,
            Terrain::Water | Terrain::Ocean | Terrain::Sea | Terrain::Coast | Terrain::FreshwaterLake
        )
    }

    pub fn is_land(self) -> bool {
        !self.is_water()
    }

    /// Preview color.
    pub fn color(self) -> [u8; 4] {
        match self {
            Terrain::Water => [0x4b, 0xb8, 0xe8, 255],
            Terrain::Land => [0x47, 0x7e, 0x19, 255],
            Terrain::Mountain => [0x71, 0x46, 0x26, 255],
            Terrain::Volcano => [0x8a, 0x2c, 0x1c, 255],
            Terrain::FloodPlain => [0x8f, 0xa8, 0x4a, 255],
            Terrain::Grassland => [0xb1, 0xb5, 0x4b, 255],
            Terrain::BonusGrassland => [0x9c, 0xb0, 0x3c, 255],
            Terrain::Plains => [0xda, 0xbe, 0x5d, 255],
            Terrain::Desert => [0xfc, 0xee, 0xa9, 255],
            Terrain::Tundra => [0xea, 0xf1, 0xdb, 255],
            Terrain::Ocean => [0x3c, 0x9e, 0x84, 255],
            Terrain::Sea => [0x3e, 0xbd, 0xa2, 255],
            Terrain::Coast => [0xa0, 0xe2, 0xb5, 255],
            Terrain::FreshwaterLake => [0x9e, 0xec, 0xbe, 255],
        }
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Terrain {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        Terrain::ALL
            .into_iter()
            .find(|t| t.name() == normalized)
            .ok_or_else(|| Error::InvalidParameter {
                name: "terrain",
                reason: format!("unknown terrain {s:?}"),
            })
    }
}
