//! Square-body collision against walls and active obstacles.

use glam::Vec2;
use wayfarer_core::{Blocker, CollisionOutcome, WorldBounds, WorldRect};

use crate::{Obstacle, Wall};

/// Tests a square entity of side `size` at the wrapped `proposed` position
/// against every wall, then every active obstacle.
///
/// A blocked move leaves the entity at `current`.
pub(crate) fn resolve(
    bounds: WorldBounds,
    walls: &[Wall],
    obstacles: &[Obstacle],
    current: Vec2,
    size: f32,
    proposed: Vec2,
) -> CollisionOutcome {
    let wrapped = bounds.wrap(proposed);
    let body = WorldRect::centered_square(wrapped, size);

    if let Some(wall) = walls.iter().find(|wall| body.overlaps(&wall.rect())) {
        return CollisionOutcome::blocked(current, Blocker::Wall(wall.id()));
    }

    if let Some(obstacle) = obstacles
        .iter()
        .filter(|obstacle| obstacle.is_active())
        .find(|obstacle| body.overlaps(&obstacle.rect()))
    {
        return CollisionOutcome::blocked(current, Blocker::Obstacle(obstacle.id()));
    }

    CollisionOutcome::clear(wrapped)
}
