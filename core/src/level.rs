//! Level configuration loaded once before a match starts.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    CellCoord, Material, Tier, DEFAULT_DESTRUCTIBLE_DURABILITY, DEFAULT_PLAYER_LIVES,
    DEFAULT_PROJECTILE_SPEED, DEFAULT_REPLAN_INTERVAL, DEFAULT_SPAWN_INTERVAL,
};

const DEFAULT_SEED: u64 = 0x5eed_7a4b_1e00_0001;

/// Immutable description of a level.
///
/// Scalar fields come first so the structure serialises cleanly into formats
/// that require values before tables.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Number of columns in the grid.
    pub columns: u32,
    /// Number of rows in the grid.
    pub rows: u32,
    /// Cell holding the objective.
    pub objective: CellCoord,
    /// Player start cell and attributes.
    pub player: PlayerConfig,
    /// Tuning values shared by the systems.
    #[serde(default)]
    pub rules: Rules,
    /// Cells where AI units may appear.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub spawn_points: Vec<CellCoord>,
    /// Terrain placed on top of an otherwise empty grid, applied in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub placements: Vec<Placement>,
    /// Ordered schedule of units to spawn.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub waves: Vec<WaveEntry>,
}

impl LevelConfig {
    /// Total number of AI units scheduled across all waves.
    #[must_use]
    pub fn scheduled_units(&self) -> u64 {
        self.waves.iter().map(|entry| u64::from(entry.count)).sum()
    }
}

/// Player attributes applied at level start and on every respawn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Tier providing the player's health and speed.
    #[serde(default = "default_player_tier")]
    pub tier: Tier,
    /// Lives granted at level start.
    #[serde(default = "default_player_lives")]
    pub lives: u32,
    /// Cell the player starts on and respawns at.
    pub start: CellCoord,
}

impl PlayerConfig {
    /// Player starting at `start` with the default tier and lives.
    #[must_use]
    pub const fn at(start: CellCoord) -> Self {
        Self {
            tier: Tier::Medium,
            lives: DEFAULT_PLAYER_LIVES,
            start,
        }
    }
}

fn default_player_tier() -> Tier {
    Tier::Medium
}

fn default_player_lives() -> u32 {
    DEFAULT_PLAYER_LIVES
}

/// Single terrain placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Column of the placed cell.
    pub column: u32,
    /// Row of the placed cell.
    pub row: u32,
    /// Material placed into the cell.
    pub material: Material,
    /// Durability override for destructible cells.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub durability: Option<u32>,
}

impl Placement {
    /// Placement of `material` at the given coordinate with default durability.
    #[must_use]
    pub const fn new(column: u32, row: u32, material: Material) -> Self {
        Self {
            column,
            row,
            material,
            durability: None,
        }
    }

    /// Coordinate of the placed cell.
    #[must_use]
    pub const fn cell(&self) -> CellCoord {
        CellCoord::new(self.column, self.row)
    }
}

/// Single entry of the wave plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WaveEntry {
    /// Tier of the units spawned by the entry.
    pub tier: Tier,
    /// Units left to spawn for the entry.
    pub count: u32,
}

/// Tuning values that govern the simulation's pacing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Simulated milliseconds between two wave spawns.
    pub spawn_interval_ms: u64,
    /// Simulated milliseconds between two path recomputations.
    pub replan_interval_ms: u64,
    /// Cells travelled by a projectile per tick.
    pub projectile_speed: u32,
    /// Durability of destructible placements without an override.
    pub destructible_durability: u32,
    /// Seed of the spawn-point generator.
    pub seed: u64,
}

impl Rules {
    /// Simulated time between two wave spawns.
    #[must_use]
    pub const fn spawn_interval(&self) -> Duration {
        Duration::from_millis(self.spawn_interval_ms)
    }

    /// Simulated time between two path recomputations.
    #[must_use]
    pub const fn replan_interval(&self) -> Duration {
        Duration::from_millis(self.replan_interval_ms)
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            spawn_interval_ms: DEFAULT_SPAWN_INTERVAL.as_millis() as u64,
            replan_interval_ms: DEFAULT_REPLAN_INTERVAL.as_millis() as u64,
            projectile_speed: DEFAULT_PROJECTILE_SPEED,
            destructible_durability: DEFAULT_DESTRUCTIBLE_DURABILITY,
            seed: DEFAULT_SEED,
        }
    }
}
