#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Per-tick exploration step tying movement, obstacle destruction and
//! treasure pickup together.

use glam::Vec2;
use serde::Deserialize;
use tracing::trace;
use wayfarer_core::{Command, EnvironmentSnapshot, Event, ObstacleId};
use wayfarer_system_movement::{Movement, MovementTuning, PlayerEntity};
use wayfarer_world::{self as world, query, World};

/// Gold rules applied on top of movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExplorationTuning {
    /// Gold removed from the player for every obstacle hit.
    pub obstacle_penalty: u32,
}

impl Default for ExplorationTuning {
    fn default() -> Self {
        Self {
            obstacle_penalty: 5,
        }
    }
}

/// Outcome of a single simulation step.
#[derive(Clone, Debug, PartialEq)]
pub struct StepResult {
    /// Player position after the step.
    pub final_position: Vec2,
    /// Whether the player hit an obstacle outside its cooldown window.
    pub hit_obstacle: bool,
    /// Obstacle destroyed by the hit.
    pub destroyed_obstacle: Option<ObstacleId>,
    /// Gold of the treasure collected this step, zero when none.
    pub collected_treasure: u32,
    /// Net gold change applied to the player.
    pub gold_delta: i64,
    /// Environment the step was simulated in.
    pub environment: EnvironmentSnapshot,
    /// World events emitted while applying the step.
    pub events: Vec<Event>,
}

/// Pure system running one exploration tick at a time.
#[derive(Clone, Debug, Default)]
pub struct Exploration {
    movement: Movement,
    tuning: ExplorationTuning,
}

impl Exploration {
    /// Creates the system from movement and gold tuning.
    #[must_use]
    pub const fn new(movement: MovementTuning, tuning: ExplorationTuning) -> Self {
        Self {
            movement: Movement::new(movement),
            tuning,
        }
    }

    /// Creates a player at the world's spawn point.
    #[must_use]
    pub fn spawn_player(&self, world: &World) -> PlayerEntity {
        PlayerEntity::spawn(query::spawn_point(world), self.movement.tuning())
    }

    /// Advances the player one tick toward `target`.
    pub fn step(&self, world: &mut World, player: &mut PlayerEntity, target: Vec2) -> StepResult {
        let environment = query::sample_environment(world, player.position());
        let bounds = query::bounds(world);

        let mut commands = Vec::new();
        let report = {
            let view: &World = world;
            self.movement.handle(
                player,
                target,
                Some(&environment),
                bounds,
                |current, size, proposed| {
                    query::resolve_collision(view, current, size, proposed)
                },
                &mut commands,
            )
        };

        let mut gold_delta = 0_i64;
        let mut events = Vec::new();
        if let Some(obstacle) = report.hit_obstacle {
            gold_delta -= i64::from(self.tuning.obstacle_penalty);
            trace!(
                obstacle = obstacle.get(),
                penalty = self.tuning.obstacle_penalty,
                "obstacle hit"
            );
        }
        for command in commands {
            world::apply(world, command, &mut events);
        }

        world::apply(
            world,
            Command::CollectTreasure {
                position: player.position(),
                size: player.size(),
            },
            &mut events,
        );

        let mut destroyed_obstacle = None;
        let mut collected_treasure = 0;
        for event in &events {
            match event {
                Event::ObstacleDestroyed { obstacle, .. } => destroyed_obstacle = Some(*obstacle),
                Event::TreasureCollected { treasure, gold } => {
                    collected_treasure = *gold;
                    trace!(treasure = treasure.get(), gold, "treasure collected");
                }
            }
        }

        gold_delta += i64::from(collected_treasure);
        player.adjust_gold(gold_delta);

        StepResult {
            final_position: player.position(),
            hit_obstacle: report.hit_obstacle.is_some(),
            destroyed_obstacle,
            collected_treasure,
            gold_delta,
            environment,
            events,
        }
    }
}

/// Runs one step with default tuning.
pub fn step(world: &mut World, player: &mut PlayerEntity, target: Vec2) -> StepResult {
    Exploration::default().step(world, player, target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn penalty_defaults_to_five_gold() {
        assert_eq!(ExplorationTuning::default().obstacle_penalty, 5);
        let tuning: ExplorationTuning = toml::from_str("obstacle_penalty = 9").expect("parses");
        assert_eq!(tuning.obstacle_penalty, 9);
    }

    #[test]
    fn idle_step_reports_environment_of_spawn() {
        let mut world = world::generate_world(60, 60, 4).expect("world generates");
        let exploration = Exploration::default();
        let mut player = exploration.spawn_player(&world);
        let here = player.position();
        let result = exploration.step(&mut world, &mut player, here);
        assert_eq!(result.final_position, here);
        assert_eq!(result.environment, query::sample_environment(&world, here));
        assert!(!result.hit_obstacle);
    }
}
