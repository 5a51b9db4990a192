#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Tank Battle.
//!
//! The world owns the terrain, every unit and projectile, and the match
//! bookkeeping. It only changes in response to [`Command`] values passed to
//! [`apply`], and it reports every change as an [`Event`]. [`World::tick`]
//! drives the pure systems in a fixed order so a run is fully determined by
//! the level and the sequence of tick inputs.

mod level;
mod projectiles;
mod terrain;
mod units;

use std::{collections::BTreeMap, time::Duration};

use tank_battle_core::{
    CellCoord, Command, ConfigError, Direction, Event, LevelConfig, Outcome, PlayerIntent,
    ProjectileId, Role, Tier, UnitId, Weapon, WorldSnapshot,
};
use tank_battle_system_combat::CollisionResolver;
use tank_battle_system_movement::{steer_player, Movement};
use tank_battle_system_spawning::{Config as SpawnConfig, SpawnScheduler};

use projectiles::{Flight, Projectile};
use units::Unit;

pub use terrain::TerrainGrid;

const PLAYER_ID: UnitId = UnitId::new(0);

/// Match bookkeeping that outlives any single player tank.
#[derive(Clone, Debug)]
struct PlayerState {
    tier: Tier,
    start: CellCoord,
    lives: u32,
    score: u32,
    weapon: Weapon,
}

/// Represents the complete state of the simulated battlefield.
#[derive(Debug)]
pub struct World {
    terrain: TerrainGrid,
    objective: CellCoord,
    spawn_points: Vec<CellCoord>,
    units: BTreeMap<UnitId, Unit>,
    projectiles: Vec<Projectile>,
    player: PlayerState,
    spawner: SpawnScheduler,
    movement: Movement,
    resolver: CollisionResolver,
    projectile_speed: u32,
    now: Duration,
    next_unit: u32,
    next_projectile: u32,
    kills: u32,
    outcome: Option<Outcome>,
}

impl World {
    /// Builds the initial state of a level.
    ///
    /// The player starts at its configured cell with the standard weapon.
    /// No AI unit exists until the first tick lets the spawner run.
    pub fn new(level: &LevelConfig) -> Result<Self, ConfigError> {
        let terrain = level::build_terrain(level).map_err(|error| {
            log::warn!("rejected level configuration: {error}");
            error
        })?;

        let player = PlayerState {
            tier: level.player.tier,
            start: level.player.start,
            lives: level.player.lives,
            score: 0,
            weapon: Weapon::Standard,
        };

        let mut units = BTreeMap::new();
        let _ = units.insert(
            PLAYER_ID,
            Unit::player(PLAYER_ID, player.tier, player.start, player.weapon),
        );

        log::info!(
            "level ready: {}x{} grid, {} scheduled units, {} lives",
            level.columns,
            level.rows,
            level.scheduled_units(),
            player.lives
        );

        Ok(Self {
            terrain,
            objective: level.objective,
            spawn_points: level.spawn_points.clone(),
            units,
            projectiles: Vec::new(),
            player,
            spawner: SpawnScheduler::new(
                SpawnConfig::new(level.rules.spawn_interval(), level.rules.seed),
                &level.waves,
            ),
            movement: Movement::new(level.rules.replan_interval()),
            resolver: CollisionResolver::new(),
            projectile_speed: level.rules.projectile_speed,
            now: Duration::ZERO,
            next_unit: PLAYER_ID.get() + 1,
            next_projectile: 0,
            kills: 0,
            outcome: None,
        })
    }

    /// Advances the simulation to the absolute time `now`.
    ///
    /// A tick runs, in order: clock advance, wave spawning, the player's
    /// intent, AI movement and fire, projectile flight with terrain damage,
    /// collision resolution and finally the victory check. Once the match
    /// has ended, ticking is a no-op and returns no events.
    pub fn tick(&mut self, now: Duration, intent: Option<PlayerIntent>) -> Vec<Event> {
        let mut events = Vec::new();
        if self.outcome.is_some() {
            return events;
        }

        apply(self, Command::Tick { now }, &mut events);

        let mut commands = Vec::new();
        self.spawner
            .handle(self.now, &self.spawn_points, &mut commands);
        self.run(&mut commands, &mut events);

        if let Some(intent) = intent {
            if self.units.contains_key(&PLAYER_ID) {
                steer_player(PLAYER_ID, &intent, &mut commands);
                self.run(&mut commands, &mut events);
            }
        }

        let units = query::unit_view(self);
        let terrain = &self.terrain;
        self.movement.handle(
            self.now,
            &units,
            self.objective,
            terrain.columns(),
            terrain.rows(),
            |cell| terrain.is_passable(cell),
            &mut commands,
        );
        self.run(&mut commands, &mut events);

        apply(self, Command::AdvanceProjectiles, &mut events);

        let units = query::unit_view(self);
        let projectiles = query::projectile_view(self);
        self.resolver
            .handle(&projectiles, &units, self.objective, &mut commands);
        self.run(&mut commands, &mut events);

        if self.outcome.is_none() && self.spawner.is_exhausted() && self.ai_units() == 0 {
            self.finish(Outcome::VictoryAllWavesCleared, &mut events);
        }

        events
    }

    /// Captures the observable state of the world.
    #[must_use]
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            columns: self.terrain.columns(),
            rows: self.terrain.rows(),
            cells: self.terrain.cells().to_vec(),
            units: query::unit_view(self).into_vec(),
            projectiles: query::projectile_view(self).into_vec(),
            objective: self.objective,
            score: self.player.score,
            lives: self.player.lives,
            weapon: self.player.weapon,
            kills: self.kills,
            elapsed: self.now,
            remaining_waves: self.spawner.remaining(),
            outcome: self.outcome,
        }
    }

    fn run(&mut self, commands: &mut Vec<Command>, events: &mut Vec<Event>) {
        for command in commands.drain(..) {
            apply(self, command, events);
        }
    }

    fn ai_units(&self) -> usize {
        self.units
            .values()
            .filter(|unit| unit.role == Role::AiControlled)
            .count()
    }

    fn finish(&mut self, outcome: Outcome, events: &mut Vec<Event>) {
        if self.outcome.is_some() {
            return;
        }
        log::info!(
            "match ended at {:?}: {:?} (score {}, kills {})",
            self.now,
            outcome,
            self.player.score,
            self.kills
        );
        self.outcome = Some(outcome);
        events.push(Event::MatchEnded { outcome });
    }

    fn spawn(&mut self, tier: Tier, cell: CellCoord, events: &mut Vec<Event>) {
        let unit = UnitId::new(self.next_unit);
        self.next_unit += 1;
        let _ = self.units.insert(unit, Unit::ai(unit, tier, cell));
        log::debug!("spawned {tier:?} unit {} at {cell}", unit.get());
        events.push(Event::UnitSpawned { unit, tier, cell });
    }

    fn step(&mut self, id: UnitId, direction: Direction, events: &mut Vec<Event>) {
        let Some(unit) = self.units.get_mut(&id) else {
            return;
        };
        unit.facing = direction;
        if !unit.can_step() {
            return;
        }

        let from = unit.cell;
        let destination = from
            .step(direction, 1)
            .filter(|cell| self.terrain.is_passable(*cell));
        match destination {
            Some(to) => {
                unit.advance_to(to);
                events.push(Event::UnitMoved { unit: id, from, to });
            }
            None => events.push(Event::UnitBlocked {
                unit: id,
                at: from,
                toward: direction,
            }),
        }
    }

    fn fire(&mut self, id: UnitId, events: &mut Vec<Event>) {
        let Some(unit) = self.units.get_mut(&id) else {
            return;
        };
        if !unit.ready_to_fire() {
            return;
        }
        unit.trigger();

        let (facing, damage) = (unit.facing, unit.damage);
        let Some(muzzle) = unit
            .cell
            .step(facing, 1)
            .filter(|cell| cell.within(self.terrain.columns(), self.terrain.rows()))
        else {
            return;
        };

        let projectile = ProjectileId::new(self.next_projectile);
        self.next_projectile += 1;
        events.push(Event::ProjectileFired {
            projectile,
            owner: id,
            cell: muzzle,
            direction: facing,
        });

        self.projectiles.push(Projectile {
            id: projectile,
            owner: id,
            cell: muzzle,
            direction: facing,
            damage,
            speed: self.projectile_speed,
        });
    }

    fn advance_projectiles(&mut self, events: &mut Vec<Event>) {
        let in_flight = std::mem::take(&mut self.projectiles);
        for mut projectile in in_flight {
            match projectile.advance(&self.terrain) {
                Flight::Airborne => self.projectiles.push(projectile),
                Flight::LeftGrid => events.push(Event::ProjectileExpired {
                    projectile: projectile.id,
                }),
                Flight::Impact(cell) => {
                    self.impact(projectile.id, cell, projectile.damage, events);
                }
            }
        }
    }

    fn impact(
        &mut self,
        projectile: ProjectileId,
        cell: CellCoord,
        damage: u32,
        events: &mut Vec<Event>,
    ) {
        events.push(Event::ProjectileImpacted { projectile, cell });
        let Ok(before) = self.terrain.cell_at(cell) else {
            return;
        };
        let Ok(after) = self.terrain.apply_damage(cell, damage) else {
            return;
        };
        if after == before {
            return;
        }
        if after.is_passable() {
            log::debug!("terrain at {cell} destroyed");
            events.push(Event::TerrainDestroyed { cell });
        } else {
            events.push(Event::TerrainDamaged {
                cell,
                remaining: after.durability(),
            });
        }
    }

    fn resolve_hit(
        &mut self,
        projectile: ProjectileId,
        id: UnitId,
        damage: u32,
        events: &mut Vec<Event>,
    ) {
        let Some(slot) = self.projectiles.iter().position(|p| p.id == projectile) else {
            return;
        };
        let owner = self.projectiles.remove(slot).owner;

        let Some(unit) = self.units.get_mut(&id) else {
            return;
        };
        unit.health = unit.health.saturating_sub(damage);
        if unit.health > 0 {
            events.push(Event::UnitDamaged {
                unit: id,
                remaining: unit.health,
            });
            return;
        }

        let (role, tier) = (unit.role, unit.tier);
        match role {
            Role::AiControlled => {
                let _ = self.units.remove(&id);
                self.kills += 1;
                if owner == PLAYER_ID {
                    self.player.score += tier.profile().score;
                }
                log::info!("unit {} ({tier:?}) destroyed by {}", id.get(), owner.get());
                events.push(Event::UnitDestroyed {
                    unit: id,
                    tier,
                    by: owner,
                });
            }
            Role::Player => {
                self.player.lives = self.player.lives.saturating_sub(1);
                log::info!("player lost a life, {} remaining", self.player.lives);
                events.push(Event::PlayerLifeLost {
                    unit: id,
                    lives_remaining: self.player.lives,
                });

                if self.player.lives == 0 {
                    let _ = self.units.remove(&id);
                    self.finish(Outcome::DefeatLives, events);
                } else {
                    let start = self.player.start;
                    let _ = self.units.insert(
                        id,
                        Unit::player(id, self.player.tier, start, self.player.weapon),
                    );
                    events.push(Event::PlayerRespawned {
                        unit: id,
                        cell: start,
                    });
                }
            }
        }
    }

    fn strike_objective(&mut self, projectile: ProjectileId, events: &mut Vec<Event>) {
        let Some(slot) = self.projectiles.iter().position(|p| p.id == projectile) else {
            return;
        };
        let _ = self.projectiles.remove(slot);
        events.push(Event::ObjectiveDestroyed { projectile });
        self.finish(Outcome::DefeatObjectiveLost, events);
    }
}

/// Applies the provided command to the world, mutating its state
/// deterministically and reporting the outcome as events.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { now } => {
            let dt = now.saturating_sub(world.now);
            world.now = world.now.max(now);
            for unit in world.units.values_mut() {
                unit.accrue(dt);
            }
            out_events.push(Event::TimeAdvanced {
                dt,
                now: world.now,
            });
        }
        Command::SpawnUnit { tier, cell } => world.spawn(tier, cell, out_events),
        Command::StepUnit { unit, direction } => world.step(unit, direction, out_events),
        Command::AssignPath {
            unit,
            path,
            planned_at,
        } => {
            if let Some(state) = world.units.get_mut(&unit) {
                if state.role == Role::AiControlled {
                    let length = state.assign_path(path, planned_at);
                    out_events.push(Event::PathAssigned { unit, length });
                }
            }
        }
        Command::Fire { unit } => world.fire(unit, out_events),
        Command::CycleWeapon { unit } => {
            if let Some(state) = world.units.get_mut(&unit) {
                if state.role == Role::Player {
                    let weapon = world.player.weapon.next();
                    world.player.weapon = weapon;
                    state.arm(weapon);
                    log::debug!("player switched to {weapon:?}");
                    out_events.push(Event::WeaponSwitched { unit, weapon });
                }
            }
        }
        Command::AdvanceProjectiles => world.advance_projectiles(out_events),
        Command::ResolveHit {
            projectile,
            unit,
            damage,
        } => world.resolve_hit(projectile, unit, damage, out_events),
        Command::StrikeObjective { projectile } => world.strike_objective(projectile, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use tank_battle_core::{CellCoord, Outcome, ProjectileView, UnitView, Weapon};

    use super::{TerrainGrid, World};

    /// Captures every live unit, ordered by identifier.
    #[must_use]
    pub fn unit_view(world: &World) -> UnitView {
        UnitView::from_snapshots(world.units.values().map(|unit| unit.snapshot()).collect())
    }

    /// Captures every live projectile in creation order.
    #[must_use]
    pub fn projectile_view(world: &World) -> ProjectileView {
        ProjectileView::from_snapshots(
            world
                .projectiles
                .iter()
                .map(|projectile| projectile.snapshot())
                .collect(),
        )
    }

    /// Provides read-only access to the terrain grid.
    #[must_use]
    pub fn terrain(world: &World) -> &TerrainGrid {
        &world.terrain
    }

    /// Cell the AI units ultimately attack.
    #[must_use]
    pub fn objective(world: &World) -> CellCoord {
        world.objective
    }

    /// Cells new AI units may appear on.
    #[must_use]
    pub fn spawn_points(world: &World) -> &[CellCoord] {
        &world.spawn_points
    }

    /// Simulated time that has elapsed since the level started.
    #[must_use]
    pub fn elapsed(world: &World) -> Duration {
        world.now
    }

    /// Simulated time at which the next wave unit appears, if any remain.
    #[must_use]
    pub fn next_spawn_at(world: &World) -> Option<Duration> {
        world.spawner.next_spawn_at()
    }

    /// Lives the player has left.
    #[must_use]
    pub fn lives(world: &World) -> u32 {
        world.player.lives
    }

    /// Score accumulated by the player.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.player.score
    }

    /// Weapon currently equipped by the player.
    #[must_use]
    pub fn weapon(world: &World) -> Weapon {
        world.player.weapon
    }

    /// Terminal state of the match, if it has ended.
    #[must_use]
    pub fn outcome(world: &World) -> Option<Outcome> {
        world.outcome
    }
}
