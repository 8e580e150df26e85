//! TOML scenario files describing an arena and the ships that fight in it.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use dogfight_core::{ControllerConfig, TileCoord};
use dogfight_world::{ArenaSettings, Board};
use serde::{Deserialize, Serialize};

/// Scenario used when no file is supplied on the command line.
pub(crate) const BUILTIN_SCENARIO: &str = include_str!("../scenarios/crossroads.toml");

/// Complete description of a headless match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Scenario {
    /// Tuning shared by every AI controller.
    #[serde(default)]
    pub(crate) controller: ControllerConfig,
    /// Board and ship physics.
    pub(crate) arena: ArenaSection,
    /// Spawn tiles; the first entry is the human-controlled ship.
    pub(crate) ships: Vec<ShipSpawn>,
}

/// `[arena]` table of a scenario.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ArenaSection {
    /// ASCII board layout.
    pub(crate) layout: String,
    /// Edge length of a tile in world units.
    #[serde(default = "default_tile_length")]
    pub(crate) tile_length: f32,
    /// Distance travelled per tick by a moving ship.
    #[serde(default = "default_ship_speed")]
    pub(crate) ship_speed: f32,
    /// Ticks a weapon needs to recharge after firing.
    #[serde(default = "default_weapon_cooldown")]
    pub(crate) weapon_cooldown: u32,
    /// Hits a ship absorbs before it is destroyed.
    #[serde(default = "default_ship_health")]
    pub(crate) ship_health: u32,
    /// Reach of a shot along a row or column, in tiles.
    #[serde(default = "default_shot_range")]
    pub(crate) shot_range: i32,
    /// Seed from which every controller's random source is derived.
    #[serde(default)]
    pub(crate) seed: u64,
}

/// `[[ships]]` entry of a scenario.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ShipSpawn {
    /// Column of the spawn tile.
    pub(crate) column: i32,
    /// Row of the spawn tile.
    pub(crate) row: i32,
}

impl ShipSpawn {
    /// Spawn tile as a board coordinate.
    #[must_use]
    pub(crate) const fn tile(self) -> TileCoord {
        TileCoord::new(self.column, self.row)
    }
}

fn default_tile_length() -> f32 {
    10.0
}

fn default_ship_speed() -> f32 {
    ArenaSettings::default().ship_speed
}

fn default_weapon_cooldown() -> u32 {
    ArenaSettings::default().weapon_cooldown
}

fn default_ship_health() -> u32 {
    ArenaSettings::default().ship_health
}

fn default_shot_range() -> i32 {
    ArenaSettings::default().shot_range
}

impl Scenario {
    /// Parses and validates a scenario from TOML text.
    pub(crate) fn parse(contents: &str) -> Result<Self> {
        let scenario: Self = toml::from_str(contents).context("failed to parse scenario toml")?;
        scenario
            .controller
            .validate()
            .context("invalid [controller] table")?;
        if scenario.ships.len() < 2 {
            bail!(
                "scenario lists {} ship(s); a match needs the player and at least one opponent",
                scenario.ships.len()
            );
        }
        Ok(scenario)
    }

    /// Reads a scenario from disk, or the built-in scenario when no path is given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Self::parse(BUILTIN_SCENARIO).context("built-in scenario is invalid");
        };
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario at {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("invalid scenario {}", path.display()))
    }

    /// Builds the board described by the `[arena]` table.
    pub(crate) fn board(&self) -> Result<Board> {
        Board::from_layout(&self.arena.layout, self.arena.tile_length)
            .context("failed to build board from [arena] layout")
    }

    /// Ship physics described by the `[arena]` table.
    #[must_use]
    pub(crate) fn arena_settings(&self) -> ArenaSettings {
        ArenaSettings {
            ship_speed: self.arena.ship_speed,
            weapon_cooldown: self.arena.weapon_cooldown,
            ship_health: self.arena.ship_health,
            shot_range: self.arena.shot_range,
        }
    }
}
