//! Generation parameters and their validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use wayfarer_core::{Direction, RandomSource, WorldBounds};

/// Half-open integer range `[min, max)` sampled uniformly during generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRange {
    /// Smallest value that may be drawn.
    pub min: u32,
    /// Exclusive upper bound.
    pub max: u32,
}

impl CountRange {
    /// Creates a new half-open range.
    #[must_use]
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Draws a value from the range.
    pub fn sample(&self, rng: &mut dyn RandomSource) -> u32 {
        self.min + rng.below(self.max.saturating_sub(self.min))
    }

    /// Reports whether `value` lies inside the range.
    #[must_use]
    pub const fn contains(&self, value: u32) -> bool {
        value >= self.min && value < self.max
    }

    const fn is_empty(&self) -> bool {
        self.max <= self.min
    }
}

/// Every constant consulted while generating a world.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorldConfig {
    /// Number of tile columns.
    pub columns: u32,
    /// Number of tile rows.
    pub rows: u32,
    /// Side length of a tile in world units.
    pub tile_length: f32,
    /// Nominal side length, in tiles, of each zone grid cell.
    pub zone_cell_size: u32,
    /// Distance in tiles under which two zone centers count as neighbours.
    pub neighbor_radius: f32,
    /// Number of cave zones carved per world.
    pub cave_count: CountRange,
    /// Cave radius in tiles.
    pub cave_radius: CountRange,
    /// Number of entrances opened in each cave wall.
    pub cave_entrances: CountRange,
    /// Minimum distance in tiles between a cave center and the map edge.
    pub cave_margin: u32,
    /// Angular step in radians between cave perimeter samples.
    pub wall_angle_step: f32,
    /// Half-width in radians of the gap left at each entrance.
    pub entrance_half_width: f32,
    /// Number of treasures the placer attempts to scatter.
    pub treasure_count: CountRange,
    /// Number of obstacles the placer attempts to scatter.
    pub obstacle_count: CountRange,
    /// Gold carried by a single treasure.
    pub treasure_gold: CountRange,
    /// Half-extent in tiles of the spawn-safe square around the map center.
    pub spawn_clearance: u32,
    /// Rejection-sampling draws allowed per object before it is skipped.
    pub placement_attempts: u32,
    /// Distance added to half the entity size when testing treasure pickup.
    pub pickup_reach_bonus: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            columns: 60,
            rows: 60,
            tile_length: 48.0,
            zone_cell_size: 12,
            neighbor_radius: 15.0,
            cave_count: CountRange::new(3, 6),
            cave_radius: CountRange::new(4, 7),
            cave_entrances: CountRange::new(1, 3),
            cave_margin: 5,
            wall_angle_step: 0.15,
            entrance_half_width: 0.4,
            treasure_count: CountRange::new(40, 60),
            obstacle_count: CountRange::new(60, 90),
            treasure_gold: CountRange::new(10, 100),
            spawn_clearance: 3,
            placement_attempts: 100,
            pickup_reach_bonus: 16.0,
        }
    }
}

impl WorldConfig {
    /// Default configuration resized to the provided grid.
    #[must_use]
    pub fn with_dimensions(columns: u32, rows: u32) -> Self {
        Self {
            columns,
            rows,
            ..Self::default()
        }
    }

    /// Toroidal bounds described by the configuration.
    #[must_use]
    pub const fn bounds(&self) -> WorldBounds {
        WorldBounds::new(self.columns, self.rows, self.tile_length)
    }

    /// Rejects configurations generation cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns == 0 || self.rows == 0 {
            return Err(ConfigError::EmptyGrid {
                columns: self.columns,
                rows: self.rows,
            });
        }
        if u64::from(self.columns) * u64::from(self.rows) > u64::from(u32::MAX) {
            return Err(ConfigError::GridTooLarge {
                columns: self.columns,
                rows: self.rows,
            });
        }
        if !(self.tile_length > 0.0) {
            return Err(ConfigError::InvalidTileLength(self.tile_length));
        }
        if self.zone_cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if !(self.wall_angle_step > 0.0) {
            return Err(ConfigError::InvalidAngleStep(self.wall_angle_step));
        }
        if self.placement_attempts == 0 {
            return Err(ConfigError::ZeroPlacementAttempts);
        }
        let margin = u64::from(self.cave_margin) * 2;
        if u64::from(self.columns) <= margin || u64::from(self.rows) <= margin {
            return Err(ConfigError::MapTooSmallForCaves {
                columns: self.columns,
                rows: self.rows,
                margin: self.cave_margin,
            });
        }

        let ranges = [
            ("cave_count", self.cave_count),
            ("cave_radius", self.cave_radius),
            ("cave_entrances", self.cave_entrances),
            ("treasure_count", self.treasure_count),
            ("obstacle_count", self.obstacle_count),
            ("treasure_gold", self.treasure_gold),
        ];
        for (name, range) in ranges {
            if range.is_empty() {
                return Err(ConfigError::EmptyRange {
                    name,
                    min: range.min,
                    max: range.max,
                });
            }
        }

        let directions = Direction::ALL.len() as u32;
        if self.cave_entrances.max > directions + 1 {
            return Err(ConfigError::TooManyEntrances {
                requested: self.cave_entrances.max - 1,
                available: directions,
            });
        }

        Ok(())
    }
}

/// Reasons a [`WorldConfig`] is rejected before generation starts.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// One of the grid dimensions is zero.
    #[error("grid must have at least one tile, got {columns}x{rows}")]
    EmptyGrid {
        /// Configured column count.
        columns: u32,
        /// Configured row count.
        rows: u32,
    },
    /// The grid holds more tiles than a `u32` tile index can address.
    #[error("grid of {columns}x{rows} tiles exceeds the addressable tile count")]
    GridTooLarge {
        /// Configured column count.
        columns: u32,
        /// Configured row count.
        rows: u32,
    },
    /// Tile length is zero, negative, or not a number.
    #[error("tile length must be positive, got {0}")]
    InvalidTileLength(f32),
    /// Zone grid cells would have zero size.
    #[error("zone cell size must be positive")]
    ZeroCellSize,
    /// Perimeter sampling would never advance.
    #[error("wall angle step must be positive, got {0}")]
    InvalidAngleStep(f32),
    /// Objects could never be placed.
    #[error("placement attempts must be positive")]
    ZeroPlacementAttempts,
    /// The cave margin leaves no room for cave centers.
    #[error("a {columns}x{rows} grid leaves no room for caves with margin {margin}")]
    MapTooSmallForCaves {
        /// Configured column count.
        columns: u32,
        /// Configured row count.
        rows: u32,
        /// Configured cave margin.
        margin: u32,
    },
    /// A sampled range contains no values.
    #[error("range `{name}` is empty: [{min}, {max})")]
    EmptyRange {
        /// Field name of the offending range.
        name: &'static str,
        /// Configured lower bound.
        min: u32,
        /// Configured exclusive upper bound.
        max: u32,
    },
    /// More entrances requested than cardinal directions exist.
    #[error("caves may open at most {available} entrances, {requested} requested")]
    TooManyEntrances {
        /// Largest entrance count the range allows.
        requested: u32,
        /// Number of cardinal directions.
        available: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_configuration_is_valid() {
        assert_eq!(WorldConfig::default().validate(), Ok(()));
    }

    #[test]
    fn zero_sized_grid_is_rejected() {
        let config = WorldConfig::with_dimensions(0, 60);
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyGrid {
                columns: 0,
                rows: 60
            })
        );
    }

    #[test]
    fn grid_beyond_tile_index_range_is_rejected() {
        let config = WorldConfig::with_dimensions(70_000, 70_000);
        assert_eq!(
            config.validate(),
            Err(ConfigError::GridTooLarge {
                columns: 70_000,
                rows: 70_000
            })
        );
        assert_eq!(WorldConfig::with_dimensions(65_536, 65_535).validate(), Ok(()));
    }

    #[test]
    fn grid_inside_cave_margin_is_rejected() {
        let config = WorldConfig::with_dimensions(10, 40);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MapTooSmallForCaves { margin: 5, .. })
        ));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let config = WorldConfig {
            treasure_count: CountRange::new(10, 10),
            ..WorldConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyRange {
                name: "treasure_count",
                ..
            })
        ));
    }

    #[test]
    fn entrance_range_is_capped_by_directions() {
        let config = WorldConfig {
            cave_entrances: CountRange::new(1, 6),
            ..WorldConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooManyEntrances { available: 4, .. })
        ));
    }

    #[test]
    fn nan_tile_length_is_rejected() {
        let config = WorldConfig {
            tile_length: f32::NAN,
            ..WorldConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTileLength(_))
        ));
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config: WorldConfig = toml::from_str(
            r#"
            columns = 80
            treasure_count = { min = 5, max = 8 }
            "#,
        )
        .expect("config parses");
        assert_eq!(config.columns, 80);
        assert_eq!(config.rows, 60);
        assert_eq!(config.treasure_count, CountRange::new(5, 8));
        assert_eq!(config.obstacle_count, CountRange::new(60, 90));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let parsed = toml::from_str::<WorldConfig>("colums = 80");
        assert!(parsed.is_err());
    }
}
