#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Tank Battle engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Systems read immutable views such as
//! [`UnitView`] and [`ProjectileView`] and respond exclusively with [`Command`]
//! batches. The world executes those commands via its `apply` entry point and
//! broadcasts [`Event`] values describing what actually changed. Adapters only
//! ever observe the world through a [`WorldSnapshot`].

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

mod level;

pub use level::{LevelConfig, Placement, PlayerConfig, Rules, WaveEntry};

/// Canonical title shown by adapters when the experience boots.
pub const GAME_TITLE: &str = "Tank Battle";

/// Simulated time between two consecutive wave spawns unless a level overrides it.
pub const DEFAULT_SPAWN_INTERVAL: Duration = Duration::from_secs(10);

/// Simulated time between two path recomputations of an AI unit.
pub const DEFAULT_REPLAN_INTERVAL: Duration = Duration::from_secs(1);

/// Number of cells a projectile travels per tick.
pub const DEFAULT_PROJECTILE_SPEED: u32 = 2;

/// Durability assigned to destructible cells that do not specify one.
pub const DEFAULT_DESTRUCTIBLE_DURABILITY: u32 = 4;

/// Lives granted to the player at level start.
pub const DEFAULT_PLAYER_LIVES: u32 = 3;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Advances the simulation clock to the provided absolute time.
    Tick {
        /// Simulated time elapsed since the level started.
        now: Duration,
    },
    /// Requests that an AI unit be created at the provided cell.
    SpawnUnit {
        /// Tier that determines the unit's attributes.
        tier: Tier,
        /// Cell the unit occupies after spawning.
        cell: CellCoord,
    },
    /// Requests that a unit face and attempt a single step in a direction.
    StepUnit {
        /// Identifier of the unit attempting to move.
        unit: UnitId,
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Replaces the cached path of an AI unit.
    AssignPath {
        /// Identifier of the unit receiving the path.
        unit: UnitId,
        /// Cells to visit in order, excluding the cell the unit occupies.
        path: Vec<CellCoord>,
        /// Simulated time at which the path was computed.
        planned_at: Duration,
    },
    /// Requests that a unit fire in its facing direction.
    Fire {
        /// Identifier of the unit pulling the trigger.
        unit: UnitId,
    },
    /// Requests that the player equip the next weapon in the cycle.
    CycleWeapon {
        /// Identifier of the player unit.
        unit: UnitId,
    },
    /// Advances every live projectile along its direction.
    AdvanceProjectiles,
    /// Applies a projectile hit against a unit.
    ResolveHit {
        /// Projectile consumed by the hit.
        projectile: ProjectileId,
        /// Unit receiving the damage.
        unit: UnitId,
        /// Damage dealt by the projectile.
        damage: u32,
    },
    /// Applies a projectile hit against the objective.
    StrikeObjective {
        /// Projectile that reached the objective cell.
        projectile: ProjectileId,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
        /// Absolute simulated time after the tick.
        now: Duration,
    },
    /// Confirms that an AI unit was created.
    UnitSpawned {
        /// Identifier assigned to the new unit.
        unit: UnitId,
        /// Tier of the new unit.
        tier: Tier,
        /// Cell the unit occupies after spawning.
        cell: CellCoord,
    },
    /// Confirms that a unit moved between two adjacent cells.
    UnitMoved {
        /// Identifier of the unit that moved.
        unit: UnitId,
        /// Cell occupied before the move.
        from: CellCoord,
        /// Cell occupied after the move.
        to: CellCoord,
    },
    /// Reports that a unit turned toward an impassable cell and stayed put.
    UnitBlocked {
        /// Identifier of the unit that was blocked.
        unit: UnitId,
        /// Cell the unit still occupies.
        at: CellCoord,
        /// Direction the unit attempted to move in.
        toward: Direction,
    },
    /// Confirms that an AI unit received a fresh path.
    PathAssigned {
        /// Identifier of the unit.
        unit: UnitId,
        /// Number of cells left to travel along the path.
        length: usize,
    },
    /// Confirms that a unit fired a projectile.
    ProjectileFired {
        /// Identifier allocated to the projectile.
        projectile: ProjectileId,
        /// Unit that fired the projectile.
        owner: UnitId,
        /// Cell the projectile occupies after leaving the barrel.
        cell: CellCoord,
        /// Direction of travel.
        direction: Direction,
    },
    /// Reports that a projectile left the grid.
    ProjectileExpired {
        /// Identifier of the projectile.
        projectile: ProjectileId,
    },
    /// Reports that a projectile was stopped by solid terrain.
    ProjectileImpacted {
        /// Identifier of the projectile.
        projectile: ProjectileId,
        /// Cell that stopped the projectile.
        cell: CellCoord,
    },
    /// Reports that a destructible cell lost durability but still stands.
    TerrainDamaged {
        /// Cell that absorbed the damage.
        cell: CellCoord,
        /// Durability left in the cell.
        remaining: u32,
    },
    /// Reports that a destructible cell collapsed into an empty cell.
    TerrainDestroyed {
        /// Cell that became empty.
        cell: CellCoord,
    },
    /// Reports that a unit survived a projectile hit.
    UnitDamaged {
        /// Identifier of the unit that was hit.
        unit: UnitId,
        /// Health left after the hit.
        remaining: u32,
    },
    /// Reports that an AI unit was destroyed and removed.
    UnitDestroyed {
        /// Identifier of the destroyed unit.
        unit: UnitId,
        /// Tier of the destroyed unit.
        tier: Tier,
        /// Owner of the projectile that landed the final hit.
        by: UnitId,
    },
    /// Reports that the player lost a life.
    PlayerLifeLost {
        /// Identifier of the player unit.
        unit: UnitId,
        /// Lives left after the loss.
        lives_remaining: u32,
    },
    /// Confirms that the player reappeared at the start cell.
    PlayerRespawned {
        /// Identifier of the player unit.
        unit: UnitId,
        /// Start cell the player returned to.
        cell: CellCoord,
    },
    /// Confirms that the player equipped a different weapon.
    WeaponSwitched {
        /// Identifier of the player unit.
        unit: UnitId,
        /// Weapon equipped after the switch.
        weapon: Weapon,
    },
    /// Reports that a projectile destroyed the objective.
    ObjectiveDestroyed {
        /// Projectile that reached the objective.
        projectile: ProjectileId,
    },
    /// Announces that the match reached a terminal state.
    MatchEnded {
        /// Reason the match ended.
        outcome: Outcome,
    },
}

/// Cardinal directions available to units and projectiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Neighbour expansion order used wherever determinism matters.
    pub const ALL: [Direction; 4] = [
        Direction::Down,
        Direction::Right,
        Direction::Up,
        Direction::Left,
    ];

    /// Direction that leads from `from` to the orthogonally adjacent `to`.
    ///
    /// Returns `None` when the cells are not direct neighbours.
    #[must_use]
    pub fn between(from: CellCoord, to: CellCoord) -> Option<Self> {
        let column_diff = from.column().abs_diff(to.column());
        let row_diff = from.row().abs_diff(to.row());
        if column_diff + row_diff != 1 {
            return None;
        }

        if column_diff == 1 {
            if to.column() > from.column() {
                Some(Self::Right)
            } else {
                Some(Self::Left)
            }
        } else if to.row() > from.row() {
            Some(Self::Down)
        } else {
            Some(Self::Up)
        }
    }
}

/// Unique identifier assigned to a unit.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct UnitId(u32);

impl UnitId {
    /// Creates a new unit identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a projectile.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }

    /// Cell reached after travelling `distance` cells in `direction`.
    ///
    /// Returns `None` when the move would leave the non-negative quadrant.
    /// Upper bounds are the grid's concern, not the coordinate's.
    #[must_use]
    pub fn step(self, direction: Direction, distance: u32) -> Option<CellCoord> {
        match direction {
            Direction::Up => self
                .row
                .checked_sub(distance)
                .map(|row| Self::new(self.column, row)),
            Direction::Down => self
                .row
                .checked_add(distance)
                .map(|row| Self::new(self.column, row)),
            Direction::Left => self
                .column
                .checked_sub(distance)
                .map(|column| Self::new(column, self.row)),
            Direction::Right => self
                .column
                .checked_add(distance)
                .map(|column| Self::new(column, self.row)),
        }
    }

    /// Reports whether the cell lies within a `columns` by `rows` grid.
    #[must_use]
    pub const fn within(&self, columns: u32, rows: u32) -> bool {
        self.column < columns && self.row < rows
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Terrain material occupying a grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    /// Open ground.
    Empty,
    /// Solid terrain that never changes.
    Indestructible,
    /// Solid terrain that collapses once its durability is exhausted.
    Destructible,
    /// Passable terrain that offers no protection.
    Cover,
}

impl Material {
    /// Reports whether units may enter a cell of this material.
    #[must_use]
    pub const fn is_passable(self) -> bool {
        matches!(self, Self::Empty | Self::Cover)
    }

    /// Reports whether projectiles are stopped by this material.
    #[must_use]
    pub const fn stops_projectiles(self) -> bool {
        !self.is_passable()
    }
}

/// State of a single terrain cell.
///
/// Durability is only meaningful for [`Material::Destructible`], and a
/// destructible cell always carries positive durability. Damage that would
/// exhaust it turns the cell into [`Material::Empty`] instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    material: Material,
    durability: u32,
}

impl Cell {
    /// Open ground.
    pub const EMPTY: Cell = Cell {
        material: Material::Empty,
        durability: 0,
    };

    /// Creates a cell of the given material.
    ///
    /// Destructible cells receive `durability`; a zero durability yields an
    /// empty cell. Other materials ignore the value.
    #[must_use]
    pub const fn new(material: Material, durability: u32) -> Self {
        match material {
            Material::Destructible if durability > 0 => Self {
                material,
                durability,
            },
            Material::Destructible | Material::Empty => Self::EMPTY,
            Material::Indestructible | Material::Cover => Self {
                material,
                durability: 0,
            },
        }
    }

    /// Material currently occupying the cell.
    #[must_use]
    pub const fn material(&self) -> Material {
        self.material
    }

    /// Durability left in a destructible cell, zero for other materials.
    #[must_use]
    pub const fn durability(&self) -> u32 {
        self.durability
    }

    /// Reports whether units may enter the cell.
    #[must_use]
    pub const fn is_passable(&self) -> bool {
        self.material.is_passable()
    }

    /// State of the cell after absorbing `amount` damage.
    ///
    /// Only destructible cells react to damage.
    #[must_use]
    pub const fn damaged(self, amount: u32) -> Self {
        match self.material {
            Material::Destructible => Self::new(
                Material::Destructible,
                self.durability.saturating_sub(amount),
            ),
            _ => self,
        }
    }
}

/// Whether a unit is steered by the player or by the AI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Unit controlled through [`PlayerIntent`].
    Player,
    /// Unit controlled by the movement system.
    AiControlled,
}

/// Unit class that determines health, speed, reload and damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Fast, fragile unit.
    Light,
    /// Balanced unit; also the player's body.
    Medium,
    /// Slow, armoured unit.
    Heavy,
    /// Very slow unit with a large health pool.
    Boss,
}

impl Tier {
    /// Attribute table entry for the tier.
    #[must_use]
    pub const fn profile(self) -> TierProfile {
        match self {
            Self::Light => TierProfile {
                health: 1,
                speed: 1.5,
                reload: Duration::from_millis(500),
                damage: 1,
                score: 100,
            },
            Self::Medium => TierProfile {
                health: 2,
                speed: 1.0,
                reload: Duration::from_millis(1_000),
                damage: 2,
                score: 200,
            },
            Self::Heavy => TierProfile {
                health: 3,
                speed: 0.5,
                reload: Duration::from_millis(1_500),
                damage: 3,
                score: 300,
            },
            Self::Boss => TierProfile {
                health: 20,
                speed: 0.3,
                reload: Duration::from_millis(2_000),
                damage: 5,
                score: 1_000,
            },
        }
    }
}

/// Attributes resolved from a [`Tier`] when a unit is constructed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TierProfile {
    /// Health a unit of the tier starts with.
    pub health: u32,
    /// Movement speed measured in cells per simulated second.
    pub speed: f32,
    /// Minimum simulated time between two shots.
    pub reload: Duration,
    /// Damage dealt by each projectile.
    pub damage: u32,
    /// Score awarded to the player for destroying a unit of the tier.
    pub score: u32,
}

/// Weapons the player cycles through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weapon {
    /// Quick-firing, light weapon.
    Standard,
    /// Mid-weight weapon.
    Medium,
    /// Slow-firing, heavy weapon.
    Heavy,
}

impl Weapon {
    /// Weapon that follows `self` in the cycle.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Standard => Self::Medium,
            Self::Medium => Self::Heavy,
            Self::Heavy => Self::Standard,
        }
    }

    /// Damage dealt by each projectile fired with the weapon.
    #[must_use]
    pub const fn damage(self) -> u32 {
        match self {
            Self::Standard => 1,
            Self::Medium => 2,
            Self::Heavy => 3,
        }
    }

    /// Minimum simulated time between two shots.
    #[must_use]
    pub const fn reload(self) -> Duration {
        match self {
            Self::Standard => Duration::from_millis(500),
            Self::Medium => Duration::from_millis(1_000),
            Self::Heavy => Duration::from_millis(1_500),
        }
    }
}

/// Input sampled from the player for a single tick.
///
/// Absence of input means "no intent this tick"; nothing is repeated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PlayerIntent {
    /// Direction the player wants to move in, if any.
    pub direction: Option<Direction>,
    /// Whether the player pulls the trigger.
    pub fire: bool,
    /// Whether the player equips the next weapon.
    pub cycle_weapon: bool,
}

impl PlayerIntent {
    /// Intent that only moves in `direction`.
    #[must_use]
    pub const fn moving(direction: Direction) -> Self {
        Self {
            direction: Some(direction),
            fire: false,
            cycle_weapon: false,
        }
    }

    /// Intent that only fires.
    #[must_use]
    pub const fn firing() -> Self {
        Self {
            direction: None,
            fire: true,
            cycle_weapon: false,
        }
    }
}

/// Terminal state reached by a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The player ran out of lives.
    DefeatLives,
    /// A projectile reached the objective.
    DefeatObjectiveLost,
    /// Every wave was spawned and destroyed.
    VictoryAllWavesCleared,
}

impl Outcome {
    /// Reports whether the outcome is a win for the player.
    #[must_use]
    pub const fn is_victory(self) -> bool {
        matches!(self, Self::VictoryAllWavesCleared)
    }
}

/// Immutable representation of a single unit's state used for queries.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UnitSnapshot {
    /// Unique identifier assigned to the unit.
    pub id: UnitId,
    /// Player or AI control.
    pub role: Role,
    /// Tier the unit was built from.
    pub tier: Tier,
    /// Grid cell currently occupied by the unit.
    pub cell: CellCoord,
    /// Direction the unit faces and fires in.
    pub facing: Direction,
    /// Health left before the unit is destroyed.
    pub health: u32,
    /// Indicates whether the reload cooldown has elapsed.
    pub ready_to_fire: bool,
    /// Head of the cached path, if any.
    pub next_hop: Option<CellCoord>,
    /// Simulated time of the last path computation, if any.
    pub planned_at: Option<Duration>,
}

/// Read-only snapshot describing all units in the world.
#[derive(Clone, Debug, Default)]
pub struct UnitView {
    snapshots: Vec<UnitSnapshot>,
}

impl UnitView {
    /// Creates a new unit view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<UnitSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured unit snapshots in ascending identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &UnitSnapshot> {
        self.snapshots.iter()
    }

    /// Snapshot of the unit with the provided identifier.
    #[must_use]
    pub fn get(&self, unit: UnitId) -> Option<&UnitSnapshot> {
        self.snapshots
            .binary_search_by_key(&unit, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// Snapshot of the player unit, if present.
    #[must_use]
    pub fn player(&self) -> Option<&UnitSnapshot> {
        self.snapshots
            .iter()
            .find(|snapshot| snapshot.role == Role::Player)
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<UnitSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a projectile in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ProjectileSnapshot {
    /// Identifier allocated when the projectile was fired.
    pub id: ProjectileId,
    /// Unit that fired the projectile. Only used to exclude self-hits.
    pub owner: UnitId,
    /// Grid cell currently occupied by the projectile.
    pub cell: CellCoord,
    /// Direction of travel.
    pub direction: Direction,
    /// Damage dealt on impact.
    pub damage: u32,
    /// Cells travelled per tick.
    pub speed: u32,
}

/// Read-only snapshot of every projectile in creation order.
#[derive(Clone, Debug, Default)]
pub struct ProjectileView {
    snapshots: Vec<ProjectileSnapshot>,
}

impl ProjectileView {
    /// Creates a new projectile view from the provided snapshots.
    ///
    /// Identifiers are allocated monotonically, so sorting by identifier
    /// restores creation order.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ProjectileSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured projectiles in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &ProjectileSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ProjectileSnapshot> {
        self.snapshots
    }
}

/// Complete read-only export of the world for rendering layers.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WorldSnapshot {
    /// Number of columns in the grid.
    pub columns: u32,
    /// Number of rows in the grid.
    pub rows: u32,
    /// Terrain cells in row-major order.
    pub cells: Vec<Cell>,
    /// Every unit, player included, in ascending identifier order.
    pub units: Vec<UnitSnapshot>,
    /// Every projectile in creation order.
    pub projectiles: Vec<ProjectileSnapshot>,
    /// Cell holding the objective.
    pub objective: CellCoord,
    /// Score accumulated by the player.
    pub score: u32,
    /// Lives left to the player.
    pub lives: u32,
    /// Weapon currently equipped by the player.
    pub weapon: Weapon,
    /// Number of AI units destroyed so far.
    pub kills: u32,
    /// Simulated time since the level started.
    pub elapsed: Duration,
    /// Wave entries that still have units to spawn.
    pub remaining_waves: Vec<WaveEntry>,
    /// Terminal state, once reached.
    pub outcome: Option<Outcome>,
}

impl WorldSnapshot {
    /// Terrain cell stored at the provided coordinate.
    #[must_use]
    pub fn cell(&self, coord: CellCoord) -> Option<Cell> {
        if !coord.within(self.columns, self.rows) {
            return None;
        }
        let index = usize::try_from(coord.row()).ok()? * usize::try_from(self.columns).ok()?
            + usize::try_from(coord.column()).ok()?;
        self.cells.get(index).copied()
    }

    /// Snapshot of the player unit, if present.
    #[must_use]
    pub fn player(&self) -> Option<&UnitSnapshot> {
        self.units.iter().find(|unit| unit.role == Role::Player)
    }

    /// Reports whether the match has ended.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }
}

/// Errors raised by grid accesses outside the configured dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// The requested cell lies outside the grid.
    #[error("cell {cell} lies outside the {columns}x{rows} grid")]
    OutOfBounds {
        /// Cell that was requested.
        cell: CellCoord,
        /// Number of columns in the grid.
        columns: u32,
        /// Number of rows in the grid.
        rows: u32,
    },
}

/// Location named by a level configuration, used in error reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Site {
    /// A terrain placement.
    Placement,
    /// The objective cell.
    Objective,
    /// A spawn point.
    SpawnPoint,
    /// The player's start cell.
    PlayerStart,
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Placement => "placement",
            Self::Objective => "objective",
            Self::SpawnPoint => "spawn point",
            Self::PlayerStart => "player start",
        };
        f.write_str(label)
    }
}

/// Reasons a level configuration is rejected before the simulation starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The grid has no cells.
    #[error("grid dimensions {columns}x{rows} must both be non-zero")]
    EmptyGrid {
        /// Configured number of columns.
        columns: u32,
        /// Configured number of rows.
        rows: u32,
    },
    /// A configured cell lies outside the grid.
    #[error("{site} {cell} lies outside the {columns}x{rows} grid")]
    OutOfBounds {
        /// Which part of the configuration named the cell.
        site: Site,
        /// Offending cell.
        cell: CellCoord,
        /// Configured number of columns.
        columns: u32,
        /// Configured number of rows.
        rows: u32,
    },
    /// A cell that units must occupy is covered by solid terrain.
    #[error("{site} {cell} is covered by impassable terrain")]
    Blocked {
        /// Which part of the configuration named the cell.
        site: Site,
        /// Offending cell.
        cell: CellCoord,
    },
    /// Waves remain but there is nowhere to spawn them.
    #[error("the wave plan schedules units but no spawn points are configured")]
    MissingSpawnPoints,
    /// Waves remain but the spawn interval is zero.
    #[error("the spawn interval must be non-zero while waves remain")]
    ZeroSpawnInterval,
    /// Projectiles would never move.
    #[error("the projectile speed must be non-zero")]
    ZeroProjectileSpeed,
    /// The player would start the level already defeated.
    #[error("the player must start with at least one life")]
    NoLives,
}
