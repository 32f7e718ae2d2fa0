//! Treasures and obstacles scattered by rejection sampling.

use std::collections::HashSet;

use glam::Vec2;
use tracing::debug;
use wayfarer_core::{BiomeKind, ObstacleId, RandomSource, TilePosition, TreasureId, WorldRect};

use crate::{TileMap, Wall, WorldConfig};

/// Lifecycle of an obstacle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObstacleState {
    /// Solid and drawn.
    Active,
    /// Permanently removed from collision and presentation.
    Destroyed,
}

/// Destructible solid occupying one tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Obstacle {
    id: ObstacleId,
    tile: TilePosition,
    rect: WorldRect,
    biome: BiomeKind,
    state: ObstacleState,
}

impl Obstacle {
    /// Identifier of the obstacle inside the world's obstacle list.
    #[must_use]
    pub const fn id(&self) -> ObstacleId {
        self.id
    }

    /// Tile the obstacle occupies.
    #[must_use]
    pub const fn tile(&self) -> TilePosition {
        self.tile
    }

    /// World-space rectangle used for collision.
    #[must_use]
    pub const fn rect(&self) -> WorldRect {
        self.rect
    }

    /// Biome of the tile the obstacle stands on, used for presentation.
    #[must_use]
    pub const fn biome(&self) -> BiomeKind {
        self.biome
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> ObstacleState {
        self.state
    }

    /// Reports whether the obstacle still blocks movement.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.state, ObstacleState::Active)
    }

    /// Transitions to destroyed, returning `false` if already destroyed.
    pub(crate) fn destroy(&mut self) -> bool {
        if self.is_active() {
            self.state = ObstacleState::Destroyed;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
impl Obstacle {
    pub(crate) fn at(id: u32, tile: TilePosition, tile_length: f32) -> Self {
        Self {
            id: ObstacleId::new(id),
            tile,
            rect: WorldRect::tile(tile, tile_length),
            biome: BiomeKind::Beach,
            state: ObstacleState::Active,
        }
    }
}

/// Lifecycle of a treasure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TreasureState {
    /// Waiting to be picked up.
    Available,
    /// Already awarded; never awarded again.
    Collected,
}

/// Gold cache resting on a tile center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Treasure {
    id: TreasureId,
    tile: TilePosition,
    position: Vec2,
    gold: u32,
    state: TreasureState,
}

impl Treasure {
    /// Identifier of the treasure inside the world's treasure list.
    #[must_use]
    pub const fn id(&self) -> TreasureId {
        self.id
    }

    /// Tile the treasure rests on.
    #[must_use]
    pub const fn tile(&self) -> TilePosition {
        self.tile
    }

    /// World-space position of the treasure.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Gold awarded on pickup.
    #[must_use]
    pub const fn gold(&self) -> u32 {
        self.gold
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> TreasureState {
        self.state
    }

    /// Reports whether the treasure can still be collected.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self.state, TreasureState::Available)
    }

    /// Marks the treasure collected and yields its gold the first time only.
    pub(crate) fn collect(&mut self) -> Option<u32> {
        if self.is_available() {
            self.state = TreasureState::Collected;
            Some(self.gold)
        } else {
            None
        }
    }
}

/// Tiles already claimed during placement.
struct Occupancy {
    claimed: HashSet<TilePosition>,
    spawn: TilePosition,
    clearance: u32,
}

impl Occupancy {
    fn new(config: &WorldConfig, walls: &[Wall]) -> Self {
        Self {
            claimed: walls.iter().map(Wall::tile).collect(),
            spawn: TilePosition::new(config.columns / 2, config.rows / 2),
            clearance: config.spawn_clearance,
        }
    }

    fn is_free(&self, tile: TilePosition) -> bool {
        let near_spawn = tile.column().abs_diff(self.spawn.column()) < self.clearance
            && tile.row().abs_diff(self.spawn.row()) < self.clearance;
        !near_spawn && !self.claimed.contains(&tile)
    }

    fn claim(&mut self, tile: TilePosition) {
        let _ = self.claimed.insert(tile);
    }
}

/// Scatters treasures and then obstacles over unclaimed tiles.
pub(crate) fn place_objects(
    config: &WorldConfig,
    tiles: &TileMap,
    walls: &[Wall],
    rng: &mut dyn RandomSource,
) -> (Vec<Treasure>, Vec<Obstacle>) {
    let mut occupancy = Occupancy::new(config, walls);

    let treasure_target = config.treasure_count.sample(rng);
    let mut treasures = Vec::with_capacity(treasure_target as usize);
    for _ in 0..treasure_target {
        let Some(tile) = draw_free_tile(config, &occupancy, rng) else {
            debug!(kind = "treasure", attempts = config.placement_attempts, "placement skipped");
            continue;
        };
        occupancy.claim(tile);
        treasures.push(Treasure {
            id: TreasureId::new(treasures.len() as u32),
            tile,
            position: tile.center(config.tile_length),
            gold: config.treasure_gold.sample(rng),
            state: TreasureState::Available,
        });
    }

    let obstacle_target = config.obstacle_count.sample(rng);
    let mut obstacles = Vec::with_capacity(obstacle_target as usize);
    for _ in 0..obstacle_target {
        let Some(tile) = draw_free_tile(config, &occupancy, rng) else {
            debug!(kind = "obstacle", attempts = config.placement_attempts, "placement skipped");
            continue;
        };
        occupancy.claim(tile);
        obstacles.push(Obstacle {
            id: ObstacleId::new(obstacles.len() as u32),
            tile,
            rect: WorldRect::tile(tile, config.tile_length),
            biome: tiles.tile(tile).biome(),
            state: ObstacleState::Active,
        });
    }

    (treasures, obstacles)
}

fn draw_free_tile(
    config: &WorldConfig,
    occupancy: &Occupancy,
    rng: &mut dyn RandomSource,
) -> Option<TilePosition> {
    (0..config.placement_attempts).find_map(|_| {
        let column = rng.below(config.columns);
        let row = rng.below(config.rows);
        let tile = TilePosition::new(column, row);
        occupancy.is_free(tile).then_some(tile)
    })
}
