//! Zone placement and biome assignment.

use glam::Vec2;
use tracing::debug;
use wayfarer_core::{
    BiomeKind, Direction, RandomSource, TilePosition, ZoneId, FALLBACK_BIOMES, NORMAL_BIOMES,
};

use crate::WorldConfig;

/// Generation-time region owning one biome.
#[derive(Clone, Debug, PartialEq)]
pub struct Zone {
    id: ZoneId,
    center: TilePosition,
    biome: BiomeKind,
    wind_direction: Option<Vec2>,
    cave: Option<CaveShape>,
}

impl Zone {
    /// Identifier of the zone inside the world's zone list.
    #[must_use]
    pub const fn id(&self) -> ZoneId {
        self.id
    }

    /// Tile at the center of the zone.
    #[must_use]
    pub const fn center(&self) -> TilePosition {
        self.center
    }

    /// Biome assigned to the zone.
    #[must_use]
    pub const fn biome(&self) -> BiomeKind {
        self.biome
    }

    /// Unit wind vector; grid zones carry one, caves do not.
    #[must_use]
    pub const fn wind_direction(&self) -> Option<Vec2> {
        self.wind_direction
    }

    /// Cave attributes when the zone is a cave.
    #[must_use]
    pub const fn cave(&self) -> Option<&CaveShape> {
        self.cave.as_ref()
    }
}

/// Radius and openings of a cave zone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaveShape {
    radius: u32,
    entrances: Vec<Direction>,
}

impl CaveShape {
    /// Radius of the cave disk in tiles.
    #[must_use]
    pub const fn radius(&self) -> u32 {
        self.radius
    }

    /// Directions in which the wall ring is left open.
    #[must_use]
    pub fn entrances(&self) -> &[Direction] {
        &self.entrances
    }

    /// Reports whether `tile` lies strictly inside the disk centered on `center`.
    ///
    /// The test does not wrap around the map edges.
    #[must_use]
    pub fn contains(&self, center: TilePosition, tile: TilePosition) -> bool {
        let dx = tile.column() as f32 - center.column() as f32;
        let dy = tile.row() as f32 - center.row() as f32;
        (dx * dx + dy * dy).sqrt() < self.radius as f32
    }
}

/// Places grid zones, assigns their biomes, then appends the cave zones.
pub(crate) fn generate_zones(config: &WorldConfig, rng: &mut dyn RandomSource) -> Vec<Zone> {
    let seeds = place_grid_seeds(config, rng);
    let centers: Vec<TilePosition> = seeds.iter().map(|seed| seed.center).collect();
    let biomes = assign_biomes(&centers, config.neighbor_radius, BiomeKind::permits, rng);

    let mut zones: Vec<Zone> = seeds
        .into_iter()
        .zip(biomes)
        .enumerate()
        .map(|(index, (seed, biome))| Zone {
            id: ZoneId::new(index as u32),
            center: seed.center,
            biome,
            wind_direction: Some(seed.wind),
            cave: None,
        })
        .collect();

    append_caves(&mut zones, config, rng);
    zones
}

#[derive(Clone, Copy, Debug)]
struct ZoneSeed {
    center: TilePosition,
    wind: Vec2,
}

fn place_grid_seeds(config: &WorldConfig, rng: &mut dyn RandomSource) -> Vec<ZoneSeed> {
    let cell = config.zone_cell_size;
    let cells_x = config.columns.div_ceil(cell);
    let cells_y = config.rows.div_ceil(cell);

    let mut seeds = Vec::with_capacity((cells_x * cells_y) as usize);
    for gy in 0..cells_y {
        for gx in 0..cells_x {
            let column = jittered_axis(gx, cell, rng).min(config.columns - 1);
            let row = jittered_axis(gy, cell, rng).min(config.rows - 1);
            let wind = draw_wind(rng);
            seeds.push(ZoneSeed {
                center: TilePosition::new(column, row),
                wind,
            });
        }
    }
    seeds
}

/// Samples a coordinate inside the middle 60% of grid cell `index`.
fn jittered_axis(index: u32, cell: u32, rng: &mut dyn RandomSource) -> u32 {
    let extent = cell as f32;
    let jitter = (rng.unit() * extent * 0.6).floor() + extent * 0.2;
    ((index * cell) as f32 + jitter).floor() as u32
}

fn draw_wind(rng: &mut dyn RandomSource) -> Vec2 {
    loop {
        let x = rng.unit() * 2.0 - 1.0;
        let y = rng.unit() * 2.0 - 1.0;
        if let Some(direction) = Vec2::new(x, y).try_normalize() {
            return direction;
        }
    }
}

/// Greedy forward assignment over zones in creation order.
///
/// Candidates must be permitted by every already assigned zone closer than
/// `radius`, where `permits(neighbour, candidate)` reads the adjacency table.
/// An empty intersection falls back to [`FALLBACK_BIOMES`] instead of failing.
fn assign_biomes<F>(
    centers: &[TilePosition],
    radius: f32,
    permits: F,
    rng: &mut dyn RandomSource,
) -> Vec<BiomeKind>
where
    F: Fn(BiomeKind, BiomeKind) -> bool,
{
    let mut assigned: Vec<BiomeKind> = Vec::with_capacity(centers.len());
    let mut fallbacks = 0_usize;

    for (index, center) in centers.iter().enumerate() {
        let neighbours: Vec<BiomeKind> = centers[..index]
            .iter()
            .zip(&assigned)
            .filter(|(other, _)| center_distance(*center, **other) < radius)
            .map(|(_, biome)| *biome)
            .collect();

        let biome = if neighbours.is_empty() {
            pick(&NORMAL_BIOMES, rng)
        } else {
            let candidates: Vec<BiomeKind> = NORMAL_BIOMES
                .iter()
                .copied()
                .filter(|candidate| neighbours.iter().all(|n| permits(*n, *candidate)))
                .collect();
            if candidates.is_empty() {
                fallbacks += 1;
                debug!(zone = index, ?neighbours, "adjacency exhausted, using fallback biomes");
                pick(&FALLBACK_BIOMES, rng)
            } else {
                pick(&candidates, rng)
            }
        };
        assigned.push(biome);
    }

    if fallbacks > 0 {
        debug!(fallbacks, zones = centers.len(), "biome assignment used fallbacks");
    }
    assigned
}

fn center_distance(a: TilePosition, b: TilePosition) -> f32 {
    let dx = a.column() as f32 - b.column() as f32;
    let dy = a.row() as f32 - b.row() as f32;
    (dx * dx + dy * dy).sqrt()
}

fn pick(candidates: &[BiomeKind], rng: &mut dyn RandomSource) -> BiomeKind {
    let index = rng.below(candidates.len() as u32) as usize;
    candidates[index]
}

fn append_caves(zones: &mut Vec<Zone>, config: &WorldConfig, rng: &mut dyn RandomSource) {
    let margin = config.cave_margin;
    let count = config.cave_count.sample(rng);

    for _ in 0..count {
        let column = margin + rng.below(config.columns - 2 * margin);
        let row = margin + rng.below(config.rows - 2 * margin);
        let radius = config.cave_radius.sample(rng);

        let entrance_count = config.cave_entrances.sample(rng);
        let mut remaining = Direction::ALL.to_vec();
        let mut entrances = Vec::with_capacity(entrance_count as usize);
        for _ in 0..entrance_count {
            let index = rng.below(remaining.len() as u32) as usize;
            entrances.push(remaining.remove(index));
        }

        zones.push(Zone {
            id: ZoneId::new(zones.len() as u32),
            center: TilePosition::new(column, row),
            biome: BiomeKind::Cave,
            wind_direction: None,
            cave: Some(CaveShape { radius, entrances }),
        });
    }
}
