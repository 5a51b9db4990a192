//! Mutable terrain grid owned by the world.

use tank_battle_core::{Cell, CellCoord, GridError};

/// Dense row-major grid of terrain cells.
///
/// Only the world mutates the grid, and only through [`TerrainGrid::apply_damage`]
/// once the level has been built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerrainGrid {
    columns: u32,
    rows: u32,
    cells: Vec<Cell>,
}

impl TerrainGrid {
    /// Creates a grid of empty cells.
    #[must_use]
    pub fn new(columns: u32, rows: u32) -> Self {
        let capacity = usize::try_from(u64::from(columns) * u64::from(rows)).unwrap_or(0);
        Self {
            columns,
            rows,
            cells: vec![Cell::EMPTY; capacity],
        }
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// State of the cell at `cell`.
    pub fn cell_at(&self, cell: CellCoord) -> Result<Cell, GridError> {
        self.index(cell)
            .map(|index| self.cells[index])
            .ok_or_else(|| self.out_of_bounds(cell))
    }

    /// Reports whether units may enter `cell`.
    ///
    /// Cells outside the grid are never passable.
    #[must_use]
    pub fn is_passable(&self, cell: CellCoord) -> bool {
        self.cell_at(cell).map_or(false, |state| state.is_passable())
    }

    /// Applies `amount` damage to `cell` and returns its resulting state.
    ///
    /// Only destructible cells change; they become empty once their
    /// durability is exhausted.
    pub fn apply_damage(&mut self, cell: CellCoord, amount: u32) -> Result<Cell, GridError> {
        let index = self.index(cell).ok_or_else(|| self.out_of_bounds(cell))?;
        let damaged = self.cells[index].damaged(amount);
        self.cells[index] = damaged;
        Ok(damaged)
    }

    pub(crate) fn place(&mut self, cell: CellCoord, state: Cell) -> Result<(), GridError> {
        let index = self.index(cell).ok_or_else(|| self.out_of_bounds(cell))?;
        self.cells[index] = state;
        Ok(())
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if !cell.within(self.columns, self.rows) {
            return None;
        }
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        Some(row * width + column)
    }

    fn out_of_bounds(&self, cell: CellCoord) -> GridError {
        GridError::OutOfBounds {
            cell,
            columns: self.columns,
            rows: self.rows,
        }
    }
}
