//! Human and machine readable renderings of a generated world.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use wayfarer_core::TilePosition;
use wayfarer_world::{query, World};

/// Aggregate counts describing a generated world.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct WorldSummary {
    pub(crate) seed: u64,
    pub(crate) columns: u32,
    pub(crate) rows: u32,
    pub(crate) zones: usize,
    pub(crate) caves: usize,
    pub(crate) walls: usize,
    pub(crate) treasures: usize,
    pub(crate) total_gold: u64,
    pub(crate) obstacles: usize,
    pub(crate) biome_tiles: BTreeMap<&'static str, usize>,
}

impl WorldSummary {
    pub(crate) fn of(world: &World, seed: u64) -> Self {
        let bounds = query::bounds(world);
        let mut biome_tiles = BTreeMap::new();
        for (_, tile) in query::tiles(world).iter() {
            *biome_tiles.entry(tile.biome().properties().name).or_insert(0) += 1;
        }
        let treasures = query::treasures(world);

        Self {
            seed,
            columns: bounds.columns(),
            rows: bounds.rows(),
            zones: query::zones(world).len(),
            caves: query::zones(world)
                .iter()
                .filter(|zone| zone.cave().is_some())
                .count(),
            walls: query::walls(world).len(),
            treasures: treasures.len(),
            total_gold: treasures.iter().map(|treasure| u64::from(treasure.gold())).sum(),
            obstacles: query::obstacles(world).len(),
            biome_tiles,
        }
    }

    pub(crate) fn to_text(&self) -> String {
        let mut lines = vec![
            format!("seed       {}", self.seed),
            format!("grid       {}x{}", self.columns, self.rows),
            format!("zones      {} ({} caves)", self.zones, self.caves),
            format!("walls      {}", self.walls),
            format!("treasures  {} worth {} gold", self.treasures, self.total_gold),
            format!("obstacles  {}", self.obstacles),
        ];
        for (name, count) in &self.biome_tiles {
            lines.push(format!("  {name:<10} {count}"));
        }
        lines.join("\n")
    }
}

/// Renders one character per tile, with objects drawn over the biome glyph.
pub(crate) fn render_map(world: &World) -> String {
    let mut overlay: HashMap<TilePosition, char> = HashMap::new();
    for treasure in query::treasures(world) {
        if treasure.is_available() {
            let _ = overlay.insert(treasure.tile(), '$');
        }
    }
    for obstacle in query::obstacles(world) {
        if obstacle.is_active() {
            let _ = overlay.insert(obstacle.tile(), 'o');
        }
    }
    for wall in query::walls(world) {
        let _ = overlay.insert(wall.tile(), '#');
    }

    let tiles = query::tiles(world);
    let mut map = String::with_capacity((tiles.columns() as usize + 1) * tiles.rows() as usize);
    for (position, tile) in tiles.iter() {
        let glyph = overlay
            .get(&position)
            .copied()
            .unwrap_or_else(|| tile.biome().glyph());
        map.push(glyph);
        if position.column() + 1 == tiles.columns() {
            map.push('\n');
        }
    }
    map
}

/// Outcome of a scripted walk toward a fixed target.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct SimulationSummary {
    pub(crate) ticks: u32,
    pub(crate) final_position: [f32; 2],
    pub(crate) gold: i64,
    pub(crate) obstacles_destroyed: usize,
    pub(crate) treasures_collected: usize,
    pub(crate) final_biome: &'static str,
}

impl SimulationSummary {
    pub(crate) fn to_text(&self) -> String {
        format!(
            "ticks      {}\nposition   ({:.1}, {:.1})\nbiome      {}\ngold       {}\ndestroyed  {}\ncollected  {}",
            self.ticks,
            self.final_position[0],
            self.final_position[1],
            self.final_biome,
            self.gold,
            self.obstacles_destroyed,
            self.treasures_collected,
        )
    }
}
