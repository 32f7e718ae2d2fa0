//! Tile to zone assignment.

use wayfarer_core::{BiomeKind, RandomSource, TilePosition, WorldBounds, ZoneId};

use crate::Zone;

/// Number of paint variants a tile may be drawn with.
pub const TILE_VARIANTS: u32 = 3;

/// Terrain recorded for a single tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tile {
    biome: BiomeKind,
    variant: u8,
    zone: ZoneId,
}

impl Tile {
    /// Biome inherited from the owning zone.
    #[must_use]
    pub const fn biome(&self) -> BiomeKind {
        self.biome
    }

    /// Paint variant in `0..TILE_VARIANTS`.
    #[must_use]
    pub const fn variant(&self) -> u8 {
        self.variant
    }

    /// Zone that owns the tile.
    #[must_use]
    pub const fn zone(&self) -> ZoneId {
        self.zone
    }
}

/// Dense row-major grid of tiles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileMap {
    columns: u32,
    rows: u32,
    tiles: Vec<Tile>,
}

impl TileMap {
    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Tile stored at `position`.
    ///
    /// # Panics
    ///
    /// Panics when `position` lies outside the grid. Callers wrap world
    /// positions before converting them to tiles, so this is unreachable for
    /// well-formed queries.
    #[must_use]
    pub fn tile(&self, position: TilePosition) -> &Tile {
        assert!(
            position.column() < self.columns && position.row() < self.rows,
            "tile {position:?} outside {}x{} grid",
            self.columns,
            self.rows
        );
        &self.tiles[position.row() as usize * self.columns as usize + position.column() as usize]
    }

    /// Iterates over every tile together with its position in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (TilePosition, &Tile)> + '_ {
        let columns = self.columns;
        self.tiles.iter().enumerate().map(move |(index, tile)| {
            let index = index as u32;
            (TilePosition::new(index % columns, index / columns), tile)
        })
    }
}

/// Assigns every tile to a zone and draws its paint variant.
///
/// Cave disks win first, in zone order. Remaining tiles go to the nearest
/// grid zone under the toroidal metric, ties resolved toward the earlier
/// zone.
pub(crate) fn assign_tiles(
    zones: &[Zone],
    bounds: WorldBounds,
    rng: &mut dyn RandomSource,
) -> TileMap {
    let caves: Vec<&Zone> = zones.iter().filter(|zone| zone.cave().is_some()).collect();
    let grid: Vec<&Zone> = zones.iter().filter(|zone| zone.cave().is_none()).collect();
    assert!(!grid.is_empty(), "tile assignment requires at least one grid zone");

    let columns = bounds.columns();
    let rows = bounds.rows();
    let mut tiles = Vec::with_capacity(columns as usize * rows as usize);

    for row in 0..rows {
        for column in 0..columns {
            let position = TilePosition::new(column, row);
            let owner = caves
                .iter()
                .find(|zone| {
                    zone.cave()
                        .is_some_and(|cave| cave.contains(zone.center(), position))
                })
                .copied()
                .unwrap_or_else(|| nearest_grid_zone(&grid, bounds, position));

            tiles.push(Tile {
                biome: owner.biome(),
                variant: rng.below(TILE_VARIANTS) as u8,
                zone: owner.id(),
            });
        }
    }

    TileMap {
        columns,
        rows,
        tiles,
    }
}

fn nearest_grid_zone<'a>(grid: &[&'a Zone], bounds: WorldBounds, tile: TilePosition) -> &'a Zone {
    let mut best = grid[0];
    let mut best_distance = bounds.toroidal_tile_distance(best.center(), tile);
    for zone in &grid[1..] {
        let distance = bounds.toroidal_tile_distance(zone.center(), tile);
        if distance < best_distance {
            best = *zone;
            best_distance = distance;
        }
    }
    best
}
