#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic movement system that plans paths and proposes unit actions.
//!
//! AI units replan on a fixed cadence toward the player, or toward the
//! objective once the player is gone. Between replans they follow their
//! cached path and simply wait when the next cell has become impassable.
//! Player units translate the sampled [`PlayerIntent`] into the same command
//! vocabulary.

use std::time::Duration;

use tank_battle_core::{
    CellCoord, Command, Direction, PlayerIntent, Role, UnitId, UnitSnapshot, UnitView,
};
use tank_battle_system_pathfinding::Pathfinder;

/// Pure system that reacts to unit snapshots and emits movement commands.
#[derive(Debug)]
pub struct Movement {
    pathfinder: Pathfinder,
    replan_interval: Duration,
}

impl Movement {
    /// Creates a movement system that replans every `replan_interval`.
    #[must_use]
    pub fn new(replan_interval: Duration) -> Self {
        Self {
            pathfinder: Pathfinder::new(),
            replan_interval,
        }
    }

    /// Emits path, step and fire commands for every AI unit in `units`.
    ///
    /// `objective` is the fallback target when no player is present.
    /// `is_passable` describes the terrain at the time of the call.
    pub fn handle<F>(
        &mut self,
        now: Duration,
        units: &UnitView,
        objective: CellCoord,
        columns: u32,
        rows: u32,
        is_passable: F,
        out: &mut Vec<Command>,
    ) where
        F: Fn(CellCoord) -> bool,
    {
        let target = select_target(units, objective);

        for unit in units.iter().filter(|unit| unit.role == Role::AiControlled) {
            let next_hop = if self.replan_due(unit, now) {
                let route: Vec<CellCoord> = self
                    .pathfinder
                    .find_path(columns, rows, unit.cell, target, &is_passable)
                    .into_iter()
                    .skip(1)
                    .collect();
                let hop = route.first().copied();
                out.push(Command::AssignPath {
                    unit: unit.id,
                    path: route,
                    planned_at: now,
                });
                hop
            } else {
                unit.next_hop
            };

            if let Some(direction) = next_hop.and_then(|hop| Direction::between(unit.cell, hop)) {
                out.push(Command::StepUnit {
                    unit: unit.id,
                    direction,
                });
            }

            if unit.ready_to_fire {
                out.push(Command::Fire { unit: unit.id });
            }
        }
    }

    fn replan_due(&self, unit: &UnitSnapshot, now: Duration) -> bool {
        unit.planned_at
            .map_or(true, |planned_at| now.saturating_sub(planned_at) >= self.replan_interval)
    }
}

/// Translates the player's sampled intent into world commands.
///
/// Weapon switching is applied first so a shot fired in the same tick already
/// uses the new weapon. Turning and moving come before firing so the shot
/// leaves in the newly chosen direction.
pub fn steer_player(unit: UnitId, intent: &PlayerIntent, out: &mut Vec<Command>) {
    if intent.cycle_weapon {
        out.push(Command::CycleWeapon { unit });
    }

    if let Some(direction) = intent.direction {
        out.push(Command::StepUnit { unit, direction });
    }

    if intent.fire {
        out.push(Command::Fire { unit });
    }
}

/// Cell AI units pursue: the player while present, the objective otherwise.
#[must_use]
pub fn select_target(units: &UnitView, objective: CellCoord) -> CellCoord {
    units.player().map_or(objective, |player| player.cell)
}
