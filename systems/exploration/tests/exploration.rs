use std::{
    collections::{hash_map::DefaultHasher, HashSet},
    hash::{Hash, Hasher},
};

use glam::Vec2;
use wayfarer_core::{Event, TilePosition};
use wayfarer_system_exploration::{step, Exploration, ExplorationTuning};
use wayfarer_system_movement::{MovementTuning, PlayerEntity};
use wayfarer_world::{generate_world, query, ObstacleState, World};

fn world(seed: u64) -> World {
    generate_world(60, 60, seed).expect("default dimensions are valid")
}

/// Finds an obstacle whose western neighbour tile holds no solid.
fn approachable_obstacle(world: &World) -> (usize, Vec2) {
    let solids: HashSet<TilePosition> = query::walls(world)
        .iter()
        .map(|wall| wall.tile())
        .chain(query::obstacles(world).iter().map(|obstacle| obstacle.tile()))
        .collect();
    query::obstacles(world)
        .iter()
        .enumerate()
        .find_map(|(index, obstacle)| {
            let tile = obstacle.tile();
            if tile.column() == 0 {
                return None;
            }
            let west = TilePosition::new(tile.column() - 1, tile.row());
            if solids.contains(&west) {
                return None;
            }
            let rect = obstacle.rect();
            let start = Vec2::new(rect.min().x - 16.25, rect.min().y + rect.size().y / 2.0);
            Some((index, start))
        })
        .expect("some obstacle has a free western neighbour")
}

#[test]
fn walking_into_an_obstacle_destroys_it_and_costs_gold() {
    let mut world = world(21);
    let (index, start) = approachable_obstacle(&world);
    let obstacle_id = query::obstacles(&world)[index].id();
    let mut player = PlayerEntity::spawn(start, &MovementTuning::default());
    let target = start + Vec2::new(300.0, 0.0);

    let result = step(&mut world, &mut player, target);

    assert!(result.hit_obstacle);
    assert_eq!(result.destroyed_obstacle, Some(obstacle_id));
    assert_eq!(result.gold_delta, result.collected_treasure as i64 - 5);
    assert_eq!(player.gold(), result.gold_delta);
    assert_eq!(
        query::obstacle(&world, obstacle_id).map(|obstacle| obstacle.state()),
        Some(ObstacleState::Destroyed)
    );
    assert!(result.events.iter().any(|event| matches!(
        event,
        Event::ObstacleDestroyed { obstacle, .. } if *obstacle == obstacle_id
    )));
}

#[test]
fn destroyed_obstacle_no_longer_blocks() {
    let mut world = world(21);
    let (index, start) = approachable_obstacle(&world);
    let obstacle_id = query::obstacles(&world)[index].id();
    let mut player = PlayerEntity::spawn(start, &MovementTuning::default());
    let target = start + Vec2::new(300.0, 0.0);

    let _ = step(&mut world, &mut player, target);
    let second = step(&mut world, &mut player, target);

    assert_ne!(second.destroyed_obstacle, Some(obstacle_id));
    assert!(second.final_position.x > start.x);
}

#[test]
fn standing_on_treasure_collects_it_once() {
    let mut world = world(5);
    let treasure = query::treasures(&world)[3];
    let mut player = PlayerEntity::spawn(treasure.position(), &MovementTuning::default());

    let first = step(&mut world, &mut player, treasure.position());
    assert_eq!(first.collected_treasure, treasure.gold());
    assert_eq!(first.gold_delta, i64::from(treasure.gold()));
    assert_eq!(player.gold(), i64::from(treasure.gold()));

    let second = step(&mut world, &mut player, treasure.position());
    assert_eq!(second.collected_treasure, 0);
    assert_eq!(second.gold_delta, 0);
    assert_eq!(player.gold(), i64::from(treasure.gold()));
}

#[test]
fn custom_penalty_is_applied() {
    let mut world = world(21);
    let (_, start) = approachable_obstacle(&world);
    let exploration = Exploration::new(
        MovementTuning::default(),
        ExplorationTuning {
            obstacle_penalty: 12,
        },
    );
    let mut player = PlayerEntity::spawn(start, &MovementTuning::default());
    let result = exploration.step(&mut world, &mut player, start + Vec2::new(300.0, 0.0));
    assert_eq!(result.gold_delta, result.collected_treasure as i64 - 12);
}

#[test]
fn player_positions_stay_wrapped() {
    let mut world = world(8);
    let exploration = Exploration::default();
    let mut player = exploration.spawn_player(&world);
    let bounds = query::bounds(&world);
    let target = Vec2::new(-400.0, 3200.0);
    for _ in 0..600 {
        let result = exploration.step(&mut world, &mut player, target);
        assert!((0.0..bounds.width()).contains(&result.final_position.x));
        assert!((0.0..bounds.height()).contains(&result.final_position.y));
    }
}

#[test]
fn deterministic_replay_matches_between_runs() {
    let first = replay(13);
    let second = replay(13);
    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(fingerprint(&first), fingerprint(&second));
}

#[derive(Debug, PartialEq)]
struct ReplayOutcome {
    positions: Vec<(u32, u32)>,
    gold: i64,
    destroyed: Vec<u32>,
    collected: Vec<u32>,
}

fn replay(seed: u64) -> ReplayOutcome {
    let mut world = world(seed);
    let exploration = Exploration::default();
    let mut player = exploration.spawn_player(&world);
    let targets = [
        Vec2::new(200.0, 200.0),
        Vec2::new(2700.0, 400.0),
        Vec2::new(1440.0, 2800.0),
        Vec2::new(-100.0, 1440.0),
    ];

    let mut outcome = ReplayOutcome {
        positions: Vec::new(),
        gold: 0,
        destroyed: Vec::new(),
        collected: Vec::new(),
    };
    for tick in 0..1_200 {
        let target = targets[(tick / 300) % targets.len()];
        let result = exploration.step(&mut world, &mut player, target);
        outcome
            .positions
            .push((result.final_position.x.to_bits(), result.final_position.y.to_bits()));
        for event in result.events {
            match event {
                Event::ObstacleDestroyed { obstacle, .. } => outcome.destroyed.push(obstacle.get()),
                Event::TreasureCollected { treasure, .. } => outcome.collected.push(treasure.get()),
            }
        }
    }
    outcome.gold = player.gold();
    outcome
}

fn fingerprint(outcome: &ReplayOutcome) -> u64 {
    let mut hasher = DefaultHasher::new();
    outcome.positions.hash(&mut hasher);
    outcome.gold.hash(&mut hasher);
    outcome.destroyed.hash(&mut hasher);
    outcome.collected.hash(&mut hasher);
    hasher.finish()
}
