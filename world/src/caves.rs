//! Cave wall carving.

use std::f32::consts::TAU;

use wayfarer_core::{Direction, TilePosition, WallId, WorldRect};

use crate::{WorldConfig, Zone};

/// Permanent, collision-solid segment of a cave's perimeter ring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wall {
    id: WallId,
    tile: TilePosition,
    rect: WorldRect,
}

impl Wall {
    /// Identifier of the wall inside the world's wall list.
    #[must_use]
    pub const fn id(&self) -> WallId {
        self.id
    }

    /// Tile the wall occupies.
    #[must_use]
    pub const fn tile(&self) -> TilePosition {
        self.tile
    }

    /// World-space rectangle used for collision.
    #[must_use]
    pub const fn rect(&self) -> WorldRect {
        self.rect
    }
}

#[cfg(test)]
impl Wall {
    pub(crate) fn at(id: u32, tile: TilePosition, tile_length: f32) -> Self {
        Self {
            id: WallId::new(id),
            tile,
            rect: WorldRect::tile(tile, tile_length),
        }
    }
}

/// Samples the perimeter of every cave zone and emits one wall per sample
/// that is neither inside an entrance gap nor outside the grid.
///
/// Samples that round onto the same tile each produce their own wall.
pub(crate) fn carve_walls(zones: &[Zone], config: &WorldConfig) -> Vec<Wall> {
    let mut walls = Vec::new();
    let bounds = config.bounds();

    for zone in zones {
        let Some(cave) = zone.cave() else {
            continue;
        };
        let center = zone.center();
        let radius = cave.radius() as f32;

        let mut step = 0_u32;
        loop {
            let angle = step as f32 * config.wall_angle_step;
            if angle >= TAU {
                break;
            }
            step += 1;

            if cave
                .entrances()
                .iter()
                .any(|direction| within_gap(angle, *direction, config.entrance_half_width))
            {
                continue;
            }

            let column = (center.column() as f32 + angle.cos() * radius).floor();
            let row = (center.row() as f32 + angle.sin() * radius).floor();
            if column < 0.0 || row < 0.0 {
                continue;
            }
            let tile = TilePosition::new(column as u32, row as u32);
            if !bounds.contains(tile) {
                continue;
            }

            walls.push(Wall {
                id: WallId::new(walls.len() as u32),
                tile,
                rect: WorldRect::tile(tile, config.tile_length),
            });
        }
    }

    walls
}

/// Circular angular distance test against the entrance's canonical angle.
fn within_gap(angle: f32, direction: Direction, half_width: f32) -> bool {
    let distance = (angle - direction.canonical_angle()).rem_euclid(TAU);
    distance < half_width || distance > TAU - half_width
}
