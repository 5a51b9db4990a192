use std::{collections::VecDeque, time::Duration};

use tank_battle_core::{CellCoord, Direction, Role, Tier, UnitId, UnitSnapshot, Weapon};

/// Movement budget spent by a single step, expressed in cells.
const STEP_COST: f32 = 1.0;

/// Live tank tracked by the world.
#[derive(Clone, Debug)]
pub(crate) struct Unit {
    pub(crate) id: UnitId,
    pub(crate) role: Role,
    pub(crate) tier: Tier,
    pub(crate) cell: CellCoord,
    pub(crate) facing: Direction,
    pub(crate) health: u32,
    pub(crate) damage: u32,
    speed: f32,
    reload: Duration,
    cooldown: Duration,
    budget: f32,
    path: VecDeque<CellCoord>,
    planned_at: Option<Duration>,
}

impl Unit {
    pub(crate) fn ai(id: UnitId, tier: Tier, cell: CellCoord) -> Self {
        let profile = tier.profile();
        Self {
            id,
            role: Role::AiControlled,
            tier,
            cell,
            facing: Direction::Down,
            health: profile.health,
            damage: profile.damage,
            speed: profile.speed,
            reload: profile.reload,
            cooldown: Duration::ZERO,
            budget: 0.0,
            path: VecDeque::new(),
            planned_at: None,
        }
    }

    /// Player tanks take their tier's hull but their weapon's firepower.
    pub(crate) fn player(id: UnitId, tier: Tier, cell: CellCoord, weapon: Weapon) -> Self {
        let mut unit = Self::ai(id, tier, cell);
        unit.role = Role::Player;
        unit.facing = Direction::Up;
        unit.damage = weapon.damage();
        unit.reload = weapon.reload();
        unit
    }

    /// Lets time pass for the unit: the cooldown drains and movement budget
    /// accrues up to a single step.
    pub(crate) fn accrue(&mut self, dt: Duration) {
        self.cooldown = self.cooldown.saturating_sub(dt);
        self.budget = (self.budget + self.speed * dt.as_secs_f32()).min(STEP_COST);
    }

    pub(crate) fn can_step(&self) -> bool {
        self.budget >= STEP_COST
    }

    pub(crate) fn ready_to_fire(&self) -> bool {
        self.cooldown.is_zero()
    }

    /// Moves into an adjacent cell, consuming one step of budget.
    pub(crate) fn advance_to(&mut self, cell: CellCoord) {
        self.budget -= STEP_COST;
        self.cell = cell;
        if self.path.front() == Some(&cell) {
            let _ = self.path.pop_front();
        }
    }

    pub(crate) fn trigger(&mut self) {
        self.cooldown = self.reload;
    }

    pub(crate) fn assign_path(&mut self, path: Vec<CellCoord>, planned_at: Duration) -> usize {
        self.path = VecDeque::from(path);
        self.planned_at = Some(planned_at);
        self.path.len()
    }

    /// Equips `weapon`, keeping an in-flight reload no longer than the new one.
    pub(crate) fn arm(&mut self, weapon: Weapon) {
        self.damage = weapon.damage();
        self.reload = weapon.reload();
        self.cooldown = self.cooldown.min(self.reload);
    }

    pub(crate) fn snapshot(&self) -> UnitSnapshot {
        UnitSnapshot {
            id: self.id,
            role: self.role,
            tier: self.tier,
            cell: self.cell,
            facing: self.facing,
            health: self.health,
            ready_to_fire: self.ready_to_fire(),
            next_hop: self.path.front().copied(),
            planned_at: self.planned_at,
        }
    }
}
