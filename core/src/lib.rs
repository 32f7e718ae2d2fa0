#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Wayfarer simulation.
//!
//! This crate defines the vocabulary that connects the authoritative world,
//! the pure systems, and adapters. The world is generated once from a
//! [`RandomSource`], answers read-only queries, and executes [`Command`]
//! values through its `apply` entry point, broadcasting [`Event`] values
//! whenever an object changes state. Systems read snapshots such as
//! [`EnvironmentSnapshot`] and respond exclusively with new commands.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub mod biome;
pub mod random;

pub use biome::{BiomeKind, BiomeProperties, FALLBACK_BIOMES, NORMAL_BIOMES};
pub use random::{RandomSource, SeededRandom};

/// Cardinal directions used for cave entrances.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Toward decreasing row indices.
    North,
    /// Toward increasing row indices.
    South,
    /// Toward increasing column indices.
    East,
    /// Toward decreasing column indices.
    West,
}

impl Direction {
    /// Directions in the order they are offered to entrance draws.
    pub const ALL: [Direction; 4] = [Self::North, Self::South, Self::East, Self::West];

    /// Angle in radians of the direction in screen space, where y grows downward.
    #[must_use]
    pub fn canonical_angle(self) -> f32 {
        match self {
            Self::North => -FRAC_PI_2,
            Self::South => FRAC_PI_2,
            Self::East => 0.0,
            Self::West => PI,
        }
    }
}

/// Orientation the player sprite faces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facing {
    /// Facing toward decreasing y.
    Up,
    /// Facing toward increasing y.
    #[default]
    Down,
    /// Facing toward decreasing x.
    Left,
    /// Facing toward increasing x.
    Right,
}

impl Facing {
    /// Derives the facing from the dominant axis of a movement delta.
    #[must_use]
    pub fn from_delta(delta: Vec2) -> Self {
        if delta.x.abs() > delta.y.abs() {
            if delta.x > 0.0 {
                Self::Right
            } else {
                Self::Left
            }
        } else if delta.y > 0.0 {
            Self::Down
        } else {
            Self::Up
        }
    }
}

macro_rules! index_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(u32);

        impl $name {
            /// Creates a new identifier with the provided numeric value.
            #[must_use]
            pub const fn new(value: u32) -> Self {
                Self(value)
            }

            /// Retrieves the numeric representation of the identifier.
            #[must_use]
            pub const fn get(&self) -> u32 {
                self.0
            }

            /// Position of the referenced entry inside its owning collection.
            #[must_use]
            pub const fn index(&self) -> usize {
                self.0 as usize
            }
        }
    };
}

index_id!(
    /// Index of a zone inside the world's zone list.
    ZoneId
);
index_id!(
    /// Index of a cave wall segment inside the world's wall list.
    WallId
);
index_id!(
    /// Index of an obstacle inside the world's obstacle list.
    ObstacleId
);
index_id!(
    /// Index of a treasure inside the world's treasure list.
    TreasureId
);

/// Location of a single tile expressed as column and row indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TilePosition {
    column: u32,
    row: u32,
}

impl TilePosition {
    /// Creates a new tile coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the tile.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the tile.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// World-space position of the tile's upper-left corner.
    #[must_use]
    pub fn origin(&self, tile_length: f32) -> Vec2 {
        Vec2::new(
            self.column as f32 * tile_length,
            self.row as f32 * tile_length,
        )
    }

    /// World-space position of the tile's center.
    #[must_use]
    pub fn center(&self, tile_length: f32) -> Vec2 {
        self.origin(tile_length) + Vec2::splat(tile_length / 2.0)
    }
}

/// Axis-aligned rectangle in world units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldRect {
    min: Vec2,
    size: Vec2,
}

impl WorldRect {
    /// Constructs a rectangle from its upper-left corner and size.
    #[must_use]
    pub const fn from_min_and_size(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Square rectangle covering exactly one tile.
    #[must_use]
    pub fn tile(tile: TilePosition, tile_length: f32) -> Self {
        Self::from_min_and_size(tile.origin(tile_length), Vec2::splat(tile_length))
    }

    /// Square of side `side` centered on `center`.
    #[must_use]
    pub fn centered_square(center: Vec2, side: f32) -> Self {
        let half = Vec2::splat(side / 2.0);
        Self::from_min_and_size(center - half, Vec2::splat(side))
    }

    /// Upper-left corner of the rectangle.
    #[must_use]
    pub const fn min(&self) -> Vec2 {
        self.min
    }

    /// Extent of the rectangle along each axis.
    #[must_use]
    pub const fn size(&self) -> Vec2 {
        self.size
    }

    /// Lower-right corner of the rectangle.
    #[must_use]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Reports whether the interiors of two rectangles intersect.
    ///
    /// Rectangles that merely share an edge do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &WorldRect) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        a_max.x > other.min.x
            && self.min.x < b_max.x
            && a_max.y > other.min.y
            && self.min.y < b_max.y
    }
}

/// Toroidal extent of the world expressed in tiles and world units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    columns: u32,
    rows: u32,
    tile_length: f32,
}

impl WorldBounds {
    /// Creates a new bounds description.
    #[must_use]
    pub const fn new(columns: u32, rows: u32, tile_length: f32) -> Self {
        Self {
            columns,
            rows,
            tile_length,
        }
    }

    /// Number of tile columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of tile rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Side length of a single square tile expressed in world units.
    #[must_use]
    pub const fn tile_length(&self) -> f32 {
        self.tile_length
    }

    /// Total width of the world measured in world units.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.tile_length
    }

    /// Total height of the world measured in world units.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.tile_length
    }

    /// Center of the world in world units.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width() / 2.0, self.height() / 2.0)
    }

    /// Wraps a world position into `[0, width) x [0, height)`.
    #[must_use]
    pub fn wrap(&self, position: Vec2) -> Vec2 {
        Vec2::new(
            wrap_axis(position.x, self.width()),
            wrap_axis(position.y, self.height()),
        )
    }

    /// Shortest displacement from `from` to `to` on the torus.
    #[must_use]
    pub fn shortest_delta(&self, from: Vec2, to: Vec2) -> Vec2 {
        Vec2::new(
            shortest_axis(to.x - from.x, self.width()),
            shortest_axis(to.y - from.y, self.height()),
        )
    }

    /// Tile that contains the wrapped position.
    #[must_use]
    pub fn tile_of(&self, position: Vec2) -> TilePosition {
        let wrapped = self.wrap(position);
        let column = (wrapped.x / self.tile_length).floor() as u32;
        let row = (wrapped.y / self.tile_length).floor() as u32;
        TilePosition::new(
            column.min(self.columns.saturating_sub(1)),
            row.min(self.rows.saturating_sub(1)),
        )
    }

    /// Reports whether the tile lies inside the grid.
    #[must_use]
    pub const fn contains(&self, tile: TilePosition) -> bool {
        tile.column < self.columns && tile.row < self.rows
    }

    /// Toroidal distance between two tiles, measured in tiles.
    #[must_use]
    pub fn toroidal_tile_distance(&self, a: TilePosition, b: TilePosition) -> f32 {
        let dx = a.column.abs_diff(b.column);
        let dy = a.row.abs_diff(b.row);
        let dx = dx.min(self.columns.saturating_sub(dx)) as f32;
        let dy = dy.min(self.rows.saturating_sub(dy)) as f32;
        (dx * dx + dy * dy).sqrt()
    }
}

fn wrap_axis(value: f32, extent: f32) -> f32 {
    if extent <= 0.0 {
        return 0.0;
    }
    let wrapped = value.rem_euclid(extent);
    if wrapped >= extent {
        0.0
    } else {
        wrapped
    }
}

fn shortest_axis(delta: f32, extent: f32) -> f32 {
    if extent <= 0.0 {
        return delta;
    }
    let forward = delta.rem_euclid(extent);
    if forward > extent / 2.0 {
        forward - extent
    } else {
        forward
    }
}

/// Solid object that stopped a proposed move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Blocker {
    /// A permanent cave wall segment.
    Wall(WallId),
    /// A destructible obstacle.
    Obstacle(ObstacleId),
}

/// Result of testing a proposed move against the world's solids.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionOutcome {
    /// Position the entity ends at: the wrapped proposal, or the unmoved
    /// current position when blocked.
    pub position: Vec2,
    /// Solid that blocked the move, if any.
    pub blocker: Option<Blocker>,
}

impl CollisionOutcome {
    /// Outcome of a move that met no solid.
    #[must_use]
    pub const fn clear(position: Vec2) -> Self {
        Self {
            position,
            blocker: None,
        }
    }

    /// Outcome of a move stopped by `blocker`.
    #[must_use]
    pub const fn blocked(position: Vec2, blocker: Blocker) -> Self {
        Self {
            position,
            blocker: Some(blocker),
        }
    }

    /// Reports whether the move was stopped.
    #[must_use]
    pub const fn collided(&self) -> bool {
        self.blocker.is_some()
    }

    /// Reports whether the move was stopped by a cave wall.
    #[must_use]
    pub const fn is_wall(&self) -> bool {
        matches!(self.blocker, Some(Blocker::Wall(_)))
    }

    /// Obstacle that stopped the move, if the blocker was an obstacle.
    #[must_use]
    pub const fn obstacle(&self) -> Option<ObstacleId> {
        match self.blocker {
            Some(Blocker::Obstacle(id)) => Some(id),
            _ => None,
        }
    }
}

/// Read-only projection of the environment at a world position.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct EnvironmentSnapshot {
    /// Biome of the owning tile.
    pub biome: BiomeKind,
    /// Display name of the biome.
    pub name: &'static str,
    /// Relative ambient light level.
    pub brightness: f32,
    /// Ambient temperature in degrees Celsius.
    pub temperature: i32,
    /// Relative humidity percentage.
    pub humidity: u32,
    /// Base wind speed of the biome.
    pub wind_speed: f32,
    /// Ambient sound level on a 0..100 scale.
    pub sound_level: u32,
    /// Unit wind vector of the owning zone, present only for windy biomes.
    pub wind_direction: Option<Vec2>,
}

impl EnvironmentSnapshot {
    /// Copies the static properties of `biome` with the supplied wind vector.
    ///
    /// The vector is discarded when the biome has no base wind.
    #[must_use]
    pub fn from_biome(biome: BiomeKind, wind_direction: Option<Vec2>) -> Self {
        let properties = biome.properties();
        Self {
            biome,
            name: properties.name,
            brightness: properties.brightness,
            temperature: properties.temperature,
            humidity: properties.humidity,
            wind_speed: properties.wind_speed,
            sound_level: properties.sound_level,
            wind_direction: wind_direction.filter(|_| properties.wind_speed > 0.0),
        }
    }

    /// Reports whether the snapshot carries a wind vector.
    #[must_use]
    pub const fn is_wind_bearing(&self) -> bool {
        self.wind_direction.is_some()
    }
}

/// Commands that express all permissible world mutations after generation.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Permanently removes an obstacle from collision and presentation.
    DestroyObstacle {
        /// Obstacle the player collided with.
        obstacle: ObstacleId,
    },
    /// Collects the first uncollected treasure within reach of an entity.
    CollectTreasure {
        /// World position of the entity's center.
        position: Vec2,
        /// Side length of the entity's bounding square.
        size: f32,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that an obstacle transitioned to destroyed.
    ObstacleDestroyed {
        /// Identifier of the destroyed obstacle.
        obstacle: ObstacleId,
        /// Tile the obstacle occupied.
        tile: TilePosition,
    },
    /// Confirms that a treasure transitioned to collected.
    TreasureCollected {
        /// Identifier of the collected treasure.
        treasure: TreasureId,
        /// Gold value awarded by the treasure.
        gold: u32,
    },
}
