//! Static biome catalogue and the adjacency graph consulted during generation.

use serde::{Deserialize, Serialize};

/// Terrain categories that zones and tiles may be assigned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiomeKind {
    /// Warm sandy coast.
    Beach,
    /// Enclosed rock cavern carved with walls.
    Cave,
    /// Humid and noisy rainforest.
    Jungle,
    /// Open plain dominated by strong directional wind.
    Windy,
    /// Wet temperate zone.
    Rain,
    /// Frozen tundra.
    Arctic,
}

/// Biomes eligible for grid zones, in the order used for uniform draws.
pub const NORMAL_BIOMES: [BiomeKind; 5] = [
    BiomeKind::Beach,
    BiomeKind::Jungle,
    BiomeKind::Windy,
    BiomeKind::Rain,
    BiomeKind::Arctic,
];

/// Temperate subset used when no candidate satisfies every neighbour.
pub const FALLBACK_BIOMES: [BiomeKind; 2] = [BiomeKind::Windy, BiomeKind::Rain];

/// Static environmental properties attached to a biome.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BiomeProperties {
    /// Human readable label shown by presentation layers.
    pub name: &'static str,
    /// Relative ambient light level.
    pub brightness: f32,
    /// Ambient temperature in degrees Celsius.
    pub temperature: i32,
    /// Relative humidity percentage.
    pub humidity: u32,
    /// Base wind speed; zero means the biome never carries a wind vector.
    pub wind_speed: f32,
    /// Ambient sound level on a 0..100 scale.
    pub sound_level: u32,
}

static PROPERTIES: [BiomeProperties; 6] = [
    BiomeProperties {
        name: "Bright Beach",
        brightness: 1.5,
        temperature: 35,
        humidity: 60,
        wind_speed: 5.0,
        sound_level: 30,
    },
    BiomeProperties {
        name: "Dark Cave",
        brightness: 0.2,
        temperature: 15,
        humidity: 80,
        wind_speed: 0.0,
        sound_level: 10,
    },
    BiomeProperties {
        name: "Loud Jungle",
        brightness: 0.8,
        temperature: 28,
        humidity: 90,
        wind_speed: 5.0,
        sound_level: 85,
    },
    BiomeProperties {
        name: "Windy Plain",
        brightness: 1.0,
        temperature: 18,
        humidity: 40,
        wind_speed: 50.0,
        sound_level: 45,
    },
    BiomeProperties {
        name: "Rainy Zone",
        brightness: 0.6,
        temperature: 12,
        humidity: 95,
        wind_speed: 20.0,
        sound_level: 50,
    },
    BiomeProperties {
        name: "Arctic Snow",
        brightness: 1.1,
        temperature: -15,
        humidity: 30,
        wind_speed: 30.0,
        sound_level: 20,
    },
];

static ADJACENCY: [&[BiomeKind]; 6] = [
    &[BiomeKind::Windy, BiomeKind::Jungle, BiomeKind::Beach],
    &[BiomeKind::Cave],
    &[
        BiomeKind::Rain,
        BiomeKind::Windy,
        BiomeKind::Beach,
        BiomeKind::Jungle,
    ],
    &[
        BiomeKind::Arctic,
        BiomeKind::Rain,
        BiomeKind::Jungle,
        BiomeKind::Beach,
        BiomeKind::Windy,
    ],
    &[
        BiomeKind::Arctic,
        BiomeKind::Windy,
        BiomeKind::Jungle,
        BiomeKind::Rain,
    ],
    &[BiomeKind::Rain, BiomeKind::Windy, BiomeKind::Arctic],
];

impl BiomeKind {
    /// Every biome kind in table order.
    pub const ALL: [BiomeKind; 6] = [
        Self::Beach,
        Self::Cave,
        Self::Jungle,
        Self::Windy,
        Self::Rain,
        Self::Arctic,
    ];

    const fn index(self) -> usize {
        match self {
            Self::Beach => 0,
            Self::Cave => 1,
            Self::Jungle => 2,
            Self::Windy => 3,
            Self::Rain => 4,
            Self::Arctic => 5,
        }
    }

    /// Static environmental properties of the biome.
    #[must_use]
    pub fn properties(self) -> &'static BiomeProperties {
        &PROPERTIES[self.index()]
    }

    /// Biomes this kind lists as acceptable neighbours.
    ///
    /// The lists are directional: generation filters a candidate against the
    /// list of each already assigned neighbour, never against the candidate's
    /// own list.
    #[must_use]
    pub fn adjacency(self) -> &'static [BiomeKind] {
        ADJACENCY[self.index()]
    }

    /// Reports whether this biome's adjacency list contains `other`.
    #[must_use]
    pub fn permits(self, other: BiomeKind) -> bool {
        self.adjacency().contains(&other)
    }

    /// Returns `true` for the cave kind.
    #[must_use]
    pub const fn is_cave(self) -> bool {
        matches!(self, Self::Cave)
    }

    /// Returns `true` when the biome belongs to [`FALLBACK_BIOMES`].
    #[must_use]
    pub fn is_fallback(self) -> bool {
        FALLBACK_BIOMES.contains(&self)
    }

    /// Single character used by text dumps of the tile grid.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Beach => '.',
            Self::Cave => ' ',
            Self::Jungle => 'j',
            Self::Windy => '~',
            Self::Rain => 'r',
            Self::Arctic => '*',
        }
    }
}
