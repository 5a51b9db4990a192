#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that resolves projectile collisions once per tick.
//!
//! Resolution runs in two passes over a single snapshot of the world. The
//! first pass matches projectiles against units, the second matches the
//! remaining projectiles against the objective. Decisions are collected as
//! commands and applied by the world afterwards, so nothing is removed while
//! it is being scanned.

use tank_battle_core::{CellCoord, Command, ProjectileView, UnitView};

/// Collision resolver that reuses scratch buffers between ticks.
#[derive(Debug, Default)]
pub struct CollisionResolver {
    health: Vec<u32>,
    consumed: Vec<bool>,
}

impl CollisionResolver {
    /// Creates a new resolver with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits `Command::ResolveHit` and `Command::StrikeObjective` entries.
    ///
    /// Projectiles are processed in creation order and units in ascending
    /// identifier order. Each projectile hits at most one unit and never its
    /// owner. A unit whose health is exhausted earlier in the pass is ignored
    /// by later projectiles. Only projectiles that survived the unit pass are
    /// tested against the objective, and the first such hit ends resolution.
    pub fn handle(
        &mut self,
        projectiles: &ProjectileView,
        units: &UnitView,
        objective: CellCoord,
        out: &mut Vec<Command>,
    ) {
        self.health.clear();
        self.health.extend(units.iter().map(|unit| unit.health));
        self.consumed.clear();

        for projectile in projectiles.iter() {
            let mut hit = false;

            for (slot, unit) in units.iter().enumerate() {
                if self.health[slot] == 0 || unit.id == projectile.owner {
                    continue;
                }
                if unit.cell != projectile.cell {
                    continue;
                }

                self.health[slot] = self.health[slot].saturating_sub(projectile.damage);
                out.push(Command::ResolveHit {
                    projectile: projectile.id,
                    unit: unit.id,
                    damage: projectile.damage,
                });
                hit = true;
                break;
            }

            self.consumed.push(hit);
        }

        let survivor = projectiles
            .iter()
            .zip(&self.consumed)
            .find(|(projectile, consumed)| !**consumed && projectile.cell == objective);

        if let Some((projectile, _)) = survivor {
            out.push(Command::StrikeObjective {
                projectile: projectile.id,
            });
        }
    }
}
