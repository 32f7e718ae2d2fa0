#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that generates wrap-around worlds and walks a player
//! through them.

mod config;
mod report;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glam::Vec2;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use wayfarer_core::{Event, SeededRandom};
use wayfarer_system_exploration::Exploration;
use wayfarer_world::{query, World};

use crate::{
    config::CliConfig,
    report::{render_map, SimulationSummary, WorldSummary},
};

#[derive(Parser)]
#[command(name = "wayfarer", about = "Generate and explore wrap-around tile worlds")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// TOML file overriding generation and movement constants
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a world and print its summary
    Generate {
        #[command(flatten)]
        world: WorldArgs,
        /// Print the tile map below the summary
        #[arg(long)]
        map: bool,
        /// Emit the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Walk the player from the spawn point toward a target
    Simulate {
        #[command(flatten)]
        world: WorldArgs,
        /// Target X coordinate in world units
        #[arg(long, allow_hyphen_values = true)]
        target_x: f32,
        /// Target Y coordinate in world units
        #[arg(long, allow_hyphen_values = true)]
        target_y: f32,
        /// Number of ticks to simulate
        #[arg(short, long, default_value = "600")]
        ticks: u32,
        /// Emit the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the environment at a world position
    Sample {
        #[command(flatten)]
        world: WorldArgs,
        /// X coordinate in world units
        #[arg(long, allow_hyphen_values = true)]
        x: f32,
        /// Y coordinate in world units
        #[arg(long, allow_hyphen_values = true)]
        y: f32,
    },
}

#[derive(clap::Args)]
struct WorldArgs {
    /// RNG seed for deterministic generation
    #[arg(short, long, default_value = "42")]
    seed: u64,
    /// Overrides the configured column count
    #[arg(long)]
    columns: Option<u32>,
    /// Overrides the configured row count
    #[arg(long)]
    rows: Option<u32>,
}

impl WorldArgs {
    fn build(&self, config: &CliConfig) -> Result<World> {
        let mut world_config = config.world.clone();
        if let Some(columns) = self.columns {
            world_config.columns = columns;
        }
        if let Some(rows) = self.rows {
            world_config.rows = rows;
        }
        let mut rng = SeededRandom::from_seed(self.seed);
        World::generate(world_config, &mut rng)
            .with_context(|| format!("failed to generate world for seed {}", self.seed))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };

    match cli.command {
        Commands::Generate { world, map, json } => {
            let generated = world.build(&config)?;
            let summary = WorldSummary::of(&generated, world.seed);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{}", summary.to_text());
            }
            if map {
                print!("{}", render_map(&generated));
            }
        }
        Commands::Simulate {
            world,
            target_x,
            target_y,
            ticks,
            json,
        } => {
            let mut generated = world.build(&config)?;
            let summary = simulate(&mut generated, &config, Vec2::new(target_x, target_y), ticks);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{}", summary.to_text());
            }
        }
        Commands::Sample { world, x, y } => {
            let generated = world.build(&config)?;
            let snapshot = query::sample_environment(&generated, Vec2::new(x, y));
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
    }

    Ok(())
}

fn simulate(world: &mut World, config: &CliConfig, target: Vec2, ticks: u32) -> SimulationSummary {
    let exploration = Exploration::new(config.movement, config.exploration);
    let mut player = exploration.spawn_player(world);
    info!(
        x = player.position().x,
        y = player.position().y,
        "player spawned"
    );

    let mut obstacles_destroyed = 0;
    let mut treasures_collected = 0;
    for tick in 0..ticks {
        let result = exploration.step(world, &mut player, target);
        for event in &result.events {
            match event {
                Event::ObstacleDestroyed { obstacle, .. } => {
                    obstacles_destroyed += 1;
                    debug!(tick, obstacle = obstacle.get(), "obstacle destroyed");
                }
                Event::TreasureCollected { treasure, gold } => {
                    treasures_collected += 1;
                    debug!(tick, treasure = treasure.get(), gold, "treasure collected");
                }
            }
        }
    }

    let position = player.position();
    SimulationSummary {
        ticks,
        final_position: [position.x, position.y],
        gold: player.gold(),
        obstacles_destroyed,
        treasures_collected,
        final_biome: query::sample_environment(world, position).name,
    }
}
