use std::{
    collections::{hash_map::DefaultHasher, HashSet},
    hash::{Hash, Hasher},
};

use glam::Vec2;
use wayfarer_core::{RandomSource, SeededRandom, TilePosition, WorldRect};
use wayfarer_world::{generate_world, query, World, WorldConfig};

const SEEDS: std::ops::Range<u64> = 0..24;

fn world(seed: u64) -> World {
    generate_world(60, 60, seed).expect("default dimensions are valid")
}

#[test]
fn neighbouring_zones_respect_adjacency_or_fallback() {
    for seed in SEEDS {
        let world = world(seed);
        let grid: Vec<_> = query::zones(&world)
            .iter()
            .filter(|zone| zone.cave().is_none())
            .collect();

        for (later_index, later) in grid.iter().enumerate() {
            for earlier in &grid[..later_index] {
                let dx = later.center().column() as f32 - earlier.center().column() as f32;
                let dy = later.center().row() as f32 - earlier.center().row() as f32;
                if (dx * dx + dy * dy).sqrt() >= 15.0 {
                    continue;
                }
                let compatible = earlier.biome().permits(later.biome());
                let fallback = earlier.biome().is_fallback() && later.biome().is_fallback();
                assert!(
                    compatible || fallback,
                    "seed {seed}: {:?} next to {:?}",
                    earlier.biome(),
                    later.biome()
                );
            }
        }
    }
}

#[test]
fn cave_interiors_belong_to_their_cave() {
    for seed in SEEDS {
        let world = world(seed);
        let tiles = query::tiles(&world);
        let caves: Vec<_> = query::zones(&world)
            .iter()
            .filter_map(|zone| zone.cave().map(|cave| (zone, cave)))
            .collect();
        assert!((3..=5).contains(&caves.len()), "seed {seed}");

        for (position, tile) in tiles.iter() {
            if let Some((zone, _)) = caves
                .iter()
                .find(|(zone, cave)| cave.contains(zone.center(), position))
            {
                assert_eq!(tile.zone(), zone.id(), "seed {seed}: {position:?}");
                assert!(tile.biome().is_cave());
            } else {
                assert!(!tile.biome().is_cave(), "seed {seed}: {position:?}");
            }
        }
    }
}

#[test]
fn every_tile_references_a_live_zone() {
    let world = world(3);
    let zones = query::zones(&world);
    for (_, tile) in query::tiles(&world).iter() {
        let zone = &zones[tile.zone().index()];
        assert_eq!(zone.biome(), tile.biome());
        assert!(u32::from(tile.variant()) < wayfarer_world::TILE_VARIANTS);
    }
}

#[test]
fn object_counts_stay_within_targets() {
    let config = WorldConfig::default();
    for seed in SEEDS {
        let world = world(seed);
        let treasures = query::treasures(&world).len() as u32;
        let obstacles = query::obstacles(&world).len() as u32;
        assert!(treasures < config.treasure_count.max, "seed {seed}");
        assert!(obstacles < config.obstacle_count.max, "seed {seed}");
        // A 60x60 map has far more free tiles than objects.
        assert!(config.treasure_count.contains(treasures), "seed {seed}");
        assert!(config.obstacle_count.contains(obstacles), "seed {seed}");
    }
}

#[test]
fn obstacles_inherit_their_tile_biome() {
    let world = world(11);
    for obstacle in query::obstacles(&world) {
        let tile = query::tiles(&world).tile(obstacle.tile());
        assert_eq!(obstacle.biome(), tile.biome());
    }
}

#[test]
fn wall_tiles_stay_inside_the_grid() {
    for seed in SEEDS {
        let world = world(seed);
        let bounds = query::bounds(&world);
        assert!(!query::walls(&world).is_empty(), "seed {seed}");
        for wall in query::walls(&world) {
            assert!(bounds.contains(wall.tile()));
        }
    }
}

#[test]
fn identical_seeds_replay_identically() {
    for seed in [0, 7, 0xdead_beef] {
        assert_eq!(fingerprint(&world(seed)), fingerprint(&world(seed)));
    }
    assert_ne!(fingerprint(&world(1)), fingerprint(&world(2)));
}

#[test]
fn wrap_is_idempotent_across_the_world() {
    let world = world(0);
    let bounds = query::bounds(&world);
    let mut rng = SeededRandom::from_seed(77);
    for _ in 0..500 {
        let point = Vec2::new(
            (rng.unit() - 0.5) * 40_000.0,
            (rng.unit() - 0.5) * 40_000.0,
        );
        let once = bounds.wrap(point);
        assert_eq!(bounds.wrap(once), once);
        assert!(once.x >= 0.0 && once.x < bounds.width());
        assert!(once.y >= 0.0 && once.y < bounds.height());
    }
}

#[test]
fn resolved_positions_never_overlap_solids() {
    let size = 32.0;
    for seed in 0..8 {
        let world = world(seed);
        let mut rng = SeededRandom::from_seed(seed ^ 0xabcd);
        let solids: Vec<WorldRect> = query::walls(&world)
            .iter()
            .map(|wall| wall.rect())
            .chain(query::obstacles(&world).iter().map(|obstacle| obstacle.rect()))
            .collect();

        for _ in 0..400 {
            let current = Vec2::new(rng.unit() * 2880.0, rng.unit() * 2880.0);
            let proposed = current + Vec2::new(rng.unit() * 8.0 - 4.0, rng.unit() * 8.0 - 4.0);
            let outcome = query::resolve_collision(&world, current, size, proposed);
            if outcome.collided() {
                assert_eq!(outcome.position, current);
                continue;
            }
            let body = WorldRect::centered_square(outcome.position, size);
            for solid in &solids {
                assert!(!body.overlaps(solid), "seed {seed}: {outcome:?} inside {solid:?}");
            }
        }
    }
}

#[test]
fn spawn_area_is_free_of_objects() {
    for seed in SEEDS {
        let world = world(seed);
        let placed: HashSet<TilePosition> = query::treasures(&world)
            .iter()
            .map(|treasure| treasure.tile())
            .chain(query::obstacles(&world).iter().map(|obstacle| obstacle.tile()))
            .collect();
        for column in 28..=32 {
            for row in 28..=32 {
                assert!(!placed.contains(&TilePosition::new(column, row)), "seed {seed}");
            }
        }
    }
}

fn fingerprint(world: &World) -> u64 {
    let mut hasher = DefaultHasher::new();
    for zone in query::zones(world) {
        zone.center().hash(&mut hasher);
        zone.biome().hash(&mut hasher);
        if let Some(wind) = zone.wind_direction() {
            wind.x.to_bits().hash(&mut hasher);
            wind.y.to_bits().hash(&mut hasher);
        }
        if let Some(cave) = zone.cave() {
            cave.radius().hash(&mut hasher);
            cave.entrances().hash(&mut hasher);
        }
    }
    for (position, tile) in query::tiles(world).iter() {
        position.hash(&mut hasher);
        tile.hash(&mut hasher);
    }
    for wall in query::walls(world) {
        wall.tile().hash(&mut hasher);
    }
    for treasure in query::treasures(world) {
        treasure.tile().hash(&mut hasher);
        treasure.gold().hash(&mut hasher);
    }
    for obstacle in query::obstacles(world) {
        obstacle.tile().hash(&mut hasher);
    }
    hasher.finish()
}
