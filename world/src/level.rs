//! Validation of level configurations into an initial terrain grid.

use tank_battle_core::{Cell, CellCoord, ConfigError, LevelConfig, Material, Site};

use crate::TerrainGrid;

/// Checks `level` and lays out its terrain.
///
/// Bounds are checked before passability so an out-of-grid site is reported
/// as such rather than as blocked.
pub(crate) fn build_terrain(level: &LevelConfig) -> Result<TerrainGrid, ConfigError> {
    let (columns, rows) = (level.columns, level.rows);
    if columns == 0 || rows == 0 {
        return Err(ConfigError::EmptyGrid { columns, rows });
    }

    let in_bounds = |site: Site, cell: CellCoord| {
        if cell.within(columns, rows) {
            Ok(())
        } else {
            Err(ConfigError::OutOfBounds {
                site,
                cell,
                columns,
                rows,
            })
        }
    };

    let mut terrain = TerrainGrid::new(columns, rows);
    for placement in &level.placements {
        let cell = placement.cell();
        in_bounds(Site::Placement, cell)?;
        let durability = match placement.material {
            Material::Destructible => placement
                .durability
                .unwrap_or(level.rules.destructible_durability),
            _ => 0,
        };
        terrain
            .place(cell, Cell::new(placement.material, durability))
            .map_err(|_| ConfigError::OutOfBounds {
                site: Site::Placement,
                cell,
                columns,
                rows,
            })?;
    }

    let sites = std::iter::once((Site::Objective, level.objective))
        .chain(std::iter::once((Site::PlayerStart, level.player.start)))
        .chain(
            level
                .spawn_points
                .iter()
                .map(|cell| (Site::SpawnPoint, *cell)),
        );
    for (site, cell) in sites {
        in_bounds(site, cell)?;
        if !terrain.is_passable(cell) {
            return Err(ConfigError::Blocked { site, cell });
        }
    }

    if level.player.lives == 0 {
        return Err(ConfigError::NoLives);
    }
    if level.rules.projectile_speed == 0 {
        return Err(ConfigError::ZeroProjectileSpeed);
    }
    if level.scheduled_units() > 0 {
        if level.spawn_points.is_empty() {
            return Err(ConfigError::MissingSpawnPoints);
        }
        if level.rules.spawn_interval_ms == 0 {
            return Err(ConfigError::ZeroSpawnInterval);
        }
    }

    Ok(terrain)
}
