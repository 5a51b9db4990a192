//! Character-grid rendering of world snapshots.

use std::fmt::Write as _;

use tank_battle_core::{CellCoord, Direction, Material, Role, Tier, WorldSnapshot};

/// Draws the battlefield, one text line per grid row.
///
/// Units are drawn above projectiles, projectiles above the objective and
/// the objective above terrain.
pub(crate) fn frame(snapshot: &WorldSnapshot) -> String {
    let mut out = String::new();
    for row in 0..snapshot.rows {
        for column in 0..snapshot.columns {
            out.push(glyph(snapshot, CellCoord::new(column, row)));
        }
        out.push('\n');
    }
    out
}

/// One-line match status shown under the grid.
pub(crate) fn summary(snapshot: &WorldSnapshot) -> String {
    let mut out = String::new();
    let status = match snapshot.outcome {
        Some(outcome) if outcome.is_victory() => format!("Won({outcome:?})"),
        Some(outcome) => format!("Lost({outcome:?})"),
        None => "InProgress".to_owned(),
    };
    let waiting: u32 = snapshot.remaining_waves.iter().map(|entry| entry.count).sum();
    let _ = write!(
        out,
        "t={:.2}s status={status} score={} kills={} lives={} weapon={:?} waiting={waiting}",
        snapshot.elapsed.as_secs_f32(),
        snapshot.score,
        snapshot.kills,
        snapshot.lives,
        snapshot.weapon,
    );
    out
}

fn glyph(snapshot: &WorldSnapshot, cell: CellCoord) -> char {
    if let Some(unit) = snapshot.units.iter().find(|unit| unit.cell == cell) {
        return match unit.role {
            Role::Player => match unit.facing {
                Direction::Up => '^',
                Direction::Down => 'v',
                Direction::Left => '<',
                Direction::Right => '>',
            },
            Role::AiControlled => match unit.tier {
                Tier::Light => 'l',
                Tier::Medium => 'm',
                Tier::Heavy => 'h',
                Tier::Boss => 'B',
            },
        };
    }
    if snapshot.projectiles.iter().any(|p| p.cell == cell) {
        return '*';
    }
    if snapshot.objective == cell {
        return 'O';
    }
    match snapshot.cell(cell).map(|state| state.material()) {
        Some(Material::Indestructible) => '#',
        Some(Material::Destructible) => '%',
        Some(Material::Cover) => '"',
        Some(Material::Empty) | None => '.',
    }
}
