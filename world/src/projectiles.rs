use tank_battle_core::{CellCoord, Direction, ProjectileId, ProjectileSnapshot, UnitId};

use crate::TerrainGrid;

/// Shell travelling across the grid.
#[derive(Clone, Debug)]
pub(crate) struct Projectile {
    pub(crate) id: ProjectileId,
    pub(crate) owner: UnitId,
    pub(crate) cell: CellCoord,
    pub(crate) direction: Direction,
    pub(crate) damage: u32,
    pub(crate) speed: u32,
}

/// Outcome of moving a projectile for one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Flight {
    Airborne,
    LeftGrid,
    Impact(CellCoord),
}

impl Projectile {
    /// Jumps `speed` cells ahead. Only the landing cell is tested against
    /// terrain, so thin walls between the start and end of a jump are skipped.
    pub(crate) fn advance(&mut self, terrain: &TerrainGrid) -> Flight {
        let landing = self
            .cell
            .step(self.direction, self.speed)
            .filter(|cell| cell.within(terrain.columns(), terrain.rows()));

        let Some(landing) = landing else {
            return Flight::LeftGrid;
        };

        self.cell = landing;
        match terrain.cell_at(landing) {
            Ok(state) if state.material().stops_projectiles() => Flight::Impact(landing),
            Ok(_) => Flight::Airborne,
            Err(_) => Flight::LeftGrid,
        }
    }

    pub(crate) fn snapshot(&self) -> ProjectileSnapshot {
        ProjectileSnapshot {
            id: self.id,
            owner: self.owner,
            cell: self.cell,
            direction: self.direction,
            damage: self.damage,
            speed: self.speed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tank_battle_core::{Cell, Material};

    fn shell(cell: CellCoord, direction: Direction) -> Projectile {
        Projectile {
            id: ProjectileId::new(0),
            owner: UnitId::new(0),
            cell,
            direction,
            damage: 1,
            speed: 2,
        }
    }

    #[test]
    fn open_ground_lets_the_shell_fly_on() {
        let terrain = TerrainGrid::new(6, 1);
        let mut projectile = shell(CellCoord::new(0, 0), Direction::Right);
        assert_eq!(projectile.advance(&terrain), Flight::Airborne);
        assert_eq!(projectile.cell, CellCoord::new(2, 0));
    }

    #[test]
    fn leaving_either_edge_expires_the_shell() {
        let terrain = TerrainGrid::new(3, 3);
        let mut low = shell(CellCoord::new(1, 1), Direction::Up);
        assert_eq!(low.advance(&terrain), Flight::LeftGrid);

        let mut high = shell(CellCoord::new(1, 1), Direction::Right);
        assert_eq!(high.advance(&terrain), Flight::LeftGrid);
    }

    #[test]
    fn solid_landing_cell_stops_the_shell() {
        let mut terrain = TerrainGrid::new(5, 1);
        terrain
            .place(CellCoord::new(3, 0), Cell::new(Material::Indestructible, 0))
            .expect("in bounds");
        let mut projectile = shell(CellCoord::new(1, 0), Direction::Right);
        assert_eq!(projectile.advance(&terrain), Flight::Impact(CellCoord::new(3, 0)));
    }

    #[test]
    fn cover_does_not_stop_shells() {
        let mut terrain = TerrainGrid::new(5, 1);
        terrain
            .place(CellCoord::new(2, 0), Cell::new(Material::Cover, 0))
            .expect("in bounds");
        let mut projectile = shell(CellCoord::new(0, 0), Direction::Right);
        assert_eq!(projectile.advance(&terrain), Flight::Airborne);
    }

    #[test]
    fn walls_inside_a_jump_are_skipped() {
        let mut terrain = TerrainGrid::new(5, 1);
        terrain
            .place(CellCoord::new(1, 0), Cell::new(Material::Destructible, 4))
            .expect("in bounds");
        let mut projectile = shell(CellCoord::new(0, 0), Direction::Right);
        assert_eq!(projectile.advance(&terrain), Flight::Airborne);
        assert_eq!(projectile.cell, CellCoord::new(2, 0));
    }
}
