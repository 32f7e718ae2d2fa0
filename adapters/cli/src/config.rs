//! Loading of the optional TOML file that tunes generation and movement.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use wayfarer_system_exploration::ExplorationTuning;
use wayfarer_system_movement::MovementTuning;
use wayfarer_world::WorldConfig;

/// Every tunable the command line tool forwards to the simulation.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct CliConfig {
    pub(crate) world: WorldConfig,
    pub(crate) movement: MovementTuning,
    pub(crate) exploration: ExplorationTuning,
}

impl CliConfig {
    /// Reads and validates the configuration stored at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration at {}", path.display()))?;
        Self::parse(&contents)
    }

    fn parse(contents: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(contents).context("failed to parse configuration toml contents")?;
        if let Err(error) = config.world.validate() {
            bail!("invalid world configuration: {error}");
        }
        if config.movement.player_size <= 0.0 {
            bail!(
                "player size must be positive, got {}",
                config.movement.player_size
            );
        }
        if config.movement.min_speed > config.movement.max_speed {
            bail!(
                "minimum speed {} exceeds maximum speed {}",
                config.movement.min_speed,
                config.movement.max_speed
            );
        }
        Ok(config)
    }
}
