#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state for the Wayfarer simulation.
//!
//! A [`World`] is generated once, synchronously, from a [`WorldConfig`] and an
//! injected [`RandomSource`]. Afterwards it only changes through [`apply`],
//! which destroys obstacles and collects treasures; everything else is read
//! through the [`query`] module.

mod caves;
mod collision;
mod config;
mod objects;
mod tiles;
mod zones;

use glam::Vec2;
use tracing::{debug, info_span};
use wayfarer_core::{
    Command, Event, ObstacleId, RandomSource, SeededRandom, TreasureId, WorldBounds,
};

pub use caves::Wall;
pub use config::{ConfigError, CountRange, WorldConfig};
pub use objects::{Obstacle, ObstacleState, Treasure, TreasureState};
pub use tiles::{Tile, TileMap, TILE_VARIANTS};
pub use zones::{CaveShape, Zone};

/// Represents the authoritative Wayfarer world state.
#[derive(Clone, Debug)]
pub struct World {
    config: WorldConfig,
    bounds: WorldBounds,
    zones: Vec<Zone>,
    tiles: TileMap,
    walls: Vec<Wall>,
    obstacles: Vec<Obstacle>,
    treasures: Vec<Treasure>,
}

impl World {
    /// Generates a world from `config`, drawing every random decision from `rng`.
    ///
    /// The configuration is validated before any draw is made.
    pub fn generate(config: WorldConfig, rng: &mut dyn RandomSource) -> Result<Self, ConfigError> {
        config.validate()?;
        let _span = info_span!("generate_world", columns = config.columns, rows = config.rows)
            .entered();

        let bounds = config.bounds();
        let zones = zones::generate_zones(&config, rng);
        let walls = caves::carve_walls(&zones, &config);
        let tiles = tiles::assign_tiles(&zones, bounds, rng);
        let (treasures, obstacles) = objects::place_objects(&config, &tiles, &walls, rng);

        debug!(
            zones = zones.len(),
            caves = zones.iter().filter(|zone| zone.cave().is_some()).count(),
            walls = walls.len(),
            treasures = treasures.len(),
            obstacles = obstacles.len(),
            "world generated"
        );

        Ok(Self {
            config,
            bounds,
            zones,
            tiles,
            walls,
            obstacles,
            treasures,
        })
    }

    fn destroy_obstacle(&mut self, obstacle: ObstacleId, out_events: &mut Vec<Event>) {
        let Some(entry) = self.obstacles.get_mut(obstacle.index()) else {
            return;
        };
        if entry.destroy() {
            out_events.push(Event::ObstacleDestroyed {
                obstacle,
                tile: entry.tile(),
            });
        }
    }

    fn collect_treasure(&mut self, position: Vec2, size: f32) -> Option<(TreasureId, u32)> {
        let center = self.bounds.wrap(position);
        let reach = size / 2.0 + self.config.pickup_reach_bonus;
        let treasure = self
            .treasures
            .iter_mut()
            .filter(|treasure| treasure.is_available())
            .find(|treasure| treasure.position().distance(center) < reach)?;
        let id = treasure.id();
        treasure.collect().map(|gold| (id, gold))
    }
}

/// Generates a world of `columns` by `rows` tiles with default constants and
/// a [`SeededRandom`] source.
pub fn generate_world(columns: u32, rows: u32, seed: u64) -> Result<World, ConfigError> {
    let mut rng = SeededRandom::from_seed(seed);
    World::generate(WorldConfig::with_dimensions(columns, rows), &mut rng)
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Events are emitted only for real state transitions.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::DestroyObstacle { obstacle } => world.destroy_obstacle(obstacle, out_events),
        Command::CollectTreasure { position, size } => {
            if let Some((treasure, gold)) = world.collect_treasure(position, size) {
                out_events.push(Event::TreasureCollected { treasure, gold });
            }
        }
    }
}

/// Collects the first available treasure within reach of an entity centered
/// on `position` and returns its gold, or zero when nothing is in reach.
pub fn check_treasure_pickup(world: &mut World, position: Vec2, size: f32) -> u32 {
    world
        .collect_treasure(position, size)
        .map_or(0, |(_, gold)| gold)
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use glam::Vec2;
    use wayfarer_core::{
        CollisionOutcome, EnvironmentSnapshot, ObstacleId, TreasureId, WorldBounds, ZoneId,
    };

    use super::{collision, Obstacle, Tile, TileMap, Treasure, Wall, World, WorldConfig, Zone};

    /// Toroidal extent of the world.
    #[must_use]
    pub fn bounds(world: &World) -> WorldBounds {
        world.bounds
    }

    /// Configuration the world was generated from.
    #[must_use]
    pub fn config(world: &World) -> &WorldConfig {
        &world.config
    }

    /// Grid zones followed by cave zones, indexed by [`ZoneId`].
    #[must_use]
    pub fn zones(world: &World) -> &[Zone] {
        &world.zones
    }

    /// Looks up a zone by identifier.
    #[must_use]
    pub fn zone(world: &World, zone: ZoneId) -> Option<&Zone> {
        world.zones.get(zone.index())
    }

    /// Provides read-only access to the tile grid.
    #[must_use]
    pub fn tiles(world: &World) -> &TileMap {
        &world.tiles
    }

    /// Tile containing the wrapped world position.
    #[must_use]
    pub fn tile_at(world: &World, position: Vec2) -> &Tile {
        world.tiles.tile(world.bounds.tile_of(position))
    }

    /// Cave wall segments, indexed by `WallId`.
    #[must_use]
    pub fn walls(world: &World) -> &[Wall] {
        &world.walls
    }

    /// Every obstacle, destroyed ones included.
    #[must_use]
    pub fn obstacles(world: &World) -> &[Obstacle] {
        &world.obstacles
    }

    /// Looks up an obstacle by identifier.
    #[must_use]
    pub fn obstacle(world: &World, obstacle: ObstacleId) -> Option<&Obstacle> {
        world.obstacles.get(obstacle.index())
    }

    /// Every treasure, collected ones included.
    #[must_use]
    pub fn treasures(world: &World) -> &[Treasure] {
        &world.treasures
    }

    /// Looks up a treasure by identifier.
    #[must_use]
    pub fn treasure(world: &World, treasure: TreasureId) -> Option<&Treasure> {
        world.treasures.get(treasure.index())
    }

    /// Resolves a proposed move of a square entity against walls and active
    /// obstacles.
    #[must_use]
    pub fn resolve_collision(
        world: &World,
        current: Vec2,
        size: f32,
        proposed: Vec2,
    ) -> CollisionOutcome {
        collision::resolve(
            world.bounds,
            &world.walls,
            &world.obstacles,
            current,
            size,
            proposed,
        )
    }

    /// Environment of the tile under the wrapped position.
    #[must_use]
    pub fn sample_environment(world: &World, position: Vec2) -> EnvironmentSnapshot {
        let tile = tile_at(world, position);
        let wind = zone(world, tile.zone()).and_then(Zone::wind_direction);
        EnvironmentSnapshot::from_biome(tile.biome(), wind)
    }

    /// Position a newly created player starts at.
    #[must_use]
    pub fn spawn_point(world: &World) -> Vec2 {
        world.bounds.center()
    }
}
