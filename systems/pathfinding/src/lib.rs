#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic A* search over the four-connected terrain grid.
//!
//! The frontier is ordered by `cost + manhattan distance`, ties resolve in
//! insertion order, and neighbours are expanded in [`Direction::ALL`] order,
//! so identical inputs always yield identical paths. An unreachable goal
//! degrades to a path holding only the start cell.

use std::{cmp::Reverse, collections::BinaryHeap};

use tank_battle_core::{CellCoord, Direction};

/// Reusable A* workspace.
///
/// Scratch buffers survive between searches so repeated replans on the same
/// grid do not allocate.
#[derive(Debug, Default)]
pub struct Pathfinder {
    costs: Vec<u32>,
    came_from: Vec<Option<usize>>,
    frontier: BinaryHeap<Reverse<FrontierEntry>>,
    sequence: u64,
}

impl Pathfinder {
    /// Creates a pathfinder with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds a shortest path from `start` to `goal`, both inclusive.
    ///
    /// `is_passable` decides which cells may be entered. The start cell is
    /// never tested since the searching unit already stands on it. When the
    /// goal cannot be reached, or either endpoint lies outside the grid, the
    /// returned path is exactly `[start]`.
    pub fn find_path<F>(
        &mut self,
        columns: u32,
        rows: u32,
        start: CellCoord,
        goal: CellCoord,
        is_passable: F,
    ) -> Vec<CellCoord>
    where
        F: Fn(CellCoord) -> bool,
    {
        if start == goal || !start.within(columns, rows) || !goal.within(columns, rows) {
            return vec![start];
        }

        let Some(width) = usize::try_from(columns).ok() else {
            return vec![start];
        };
        let Some(cell_count) = usize::try_from(rows)
            .ok()
            .and_then(|height| height.checked_mul(width))
        else {
            return vec![start];
        };

        self.prepare(cell_count);

        let (Some(start_index), Some(goal_index)) = (index(width, start), index(width, goal)) else {
            return vec![start];
        };

        self.costs[start_index] = 0;
        self.push(start_index, 0, start.manhattan_distance(goal));

        let mut reached = false;
        while let Some(Reverse(entry)) = self.frontier.pop() {
            if entry.index == goal_index {
                reached = true;
                break;
            }

            if entry.cost > self.costs[entry.index] {
                continue;
            }

            let current = coord(width, entry.index);
            let next_cost = entry.cost.saturating_add(1);

            for direction in Direction::ALL {
                let Some(neighbor) = current.step(direction, 1) else {
                    continue;
                };
                if !neighbor.within(columns, rows) || !is_passable(neighbor) {
                    continue;
                }
                let Some(neighbor_index) = index(width, neighbor) else {
                    continue;
                };

                if next_cost >= self.costs[neighbor_index] {
                    continue;
                }

                self.costs[neighbor_index] = next_cost;
                self.came_from[neighbor_index] = Some(entry.index);
                self.push(
                    neighbor_index,
                    next_cost,
                    next_cost.saturating_add(neighbor.manhattan_distance(goal)),
                );
            }
        }

        if !reached {
            log::trace!("no path from {start} to {goal}");
            return vec![start];
        }

        self.reconstruct(width, start_index, goal_index)
    }

    fn prepare(&mut self, cell_count: usize) {
        self.costs.clear();
        self.costs.resize(cell_count, u32::MAX);
        self.came_from.clear();
        self.came_from.resize(cell_count, None);
        self.frontier.clear();
        self.sequence = 0;
    }

    fn push(&mut self, index: usize, cost: u32, priority: u32) {
        self.frontier.push(Reverse(FrontierEntry {
            priority,
            sequence: self.sequence,
            index,
            cost,
        }));
        self.sequence = self.sequence.wrapping_add(1);
    }

    fn reconstruct(&self, width: usize, start_index: usize, goal_index: usize) -> Vec<CellCoord> {
        let mut path = vec![coord(width, goal_index)];
        let mut current = goal_index;

        while current != start_index {
            match self.came_from[current] {
                Some(previous) => {
                    path.push(coord(width, previous));
                    current = previous;
                }
                None => break,
            }
        }

        path.reverse();
        path
    }
}

/// Frontier entry ordered by priority, then by insertion sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct FrontierEntry {
    priority: u32,
    sequence: u64,
    index: usize,
    cost: u32,
}

fn index(width: usize, cell: CellCoord) -> Option<usize> {
    let column = usize::try_from(cell.column()).ok()?;
    let row = usize::try_from(cell.row()).ok()?;
    row.checked_mul(width)?.checked_add(column)
}

fn coord(width: usize, index: usize) -> CellCoord {
    let column = index % width;
    let row = index / width;
    CellCoord::new(column as u32, row as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(_: CellCoord) -> bool {
        true
    }

    #[test]
    fn straight_line_on_open_grid() {
        let mut pathfinder = Pathfinder::new();
        let path = pathfinder.find_path(5, 1, CellCoord::new(0, 0), CellCoord::new(4, 0), open);

        let expected: Vec<CellCoord> = (0..5).map(|column| CellCoord::new(column, 0)).collect();
        assert_eq!(path, expected);
    }

    #[test]
    fn start_equal_to_goal_yields_single_cell() {
        let mut pathfinder = Pathfinder::new();
        let cell = CellCoord::new(2, 2);
        assert_eq!(pathfinder.find_path(4, 4, cell, cell, open), vec![cell]);
    }

    #[test]
    fn detours_around_a_wall() {
        let mut pathfinder = Pathfinder::new();
        // Column 1 is walled except for the bottom row.
        let wall = |cell: CellCoord| !(cell.column() == 1 && cell.row() < 2);
        let start = CellCoord::new(0, 0);
        let goal = CellCoord::new(2, 0);

        let path = pathfinder.find_path(3, 3, start, goal, wall);

        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&goal));
        assert_eq!(path.len(), 7);
        assert!(path.iter().all(|cell| wall(*cell)));
    }

    #[test]
    fn walled_off_goal_returns_start_only() {
        let mut pathfinder = Pathfinder::new();
        let goal = CellCoord::new(2, 2);
        let around_goal = |cell: CellCoord| cell.manhattan_distance(goal) != 1;
        let start = CellCoord::new(0, 0);

        assert_eq!(
            pathfinder.find_path(5, 5, start, goal, around_goal),
            vec![start]
        );
    }

    #[test]
    fn impassable_goal_returns_start_only() {
        let mut pathfinder = Pathfinder::new();
        let goal = CellCoord::new(3, 0);
        let start = CellCoord::new(0, 0);

        assert_eq!(
            pathfinder.find_path(4, 1, start, goal, |cell| cell != goal),
            vec![start]
        );
    }

    #[test]
    fn goal_outside_grid_returns_start_only() {
        let mut pathfinder = Pathfinder::new();
        let start = CellCoord::new(1, 1);
        assert_eq!(
            pathfinder.find_path(3, 3, start, CellCoord::new(9, 9), open),
            vec![start]
        );
    }

    #[test]
    fn equal_priority_ties_resolve_in_insertion_order() {
        let mut pathfinder = Pathfinder::new();
        let path = pathfinder.find_path(2, 2, CellCoord::new(0, 0), CellCoord::new(1, 1), open);

        // Down is expanded before Right, so the first equal-priority entry
        // popped is the cell below the start.
        assert_eq!(
            path,
            vec![
                CellCoord::new(0, 0),
                CellCoord::new(0, 1),
                CellCoord::new(1, 1),
            ]
        );
    }

    #[test]
    fn workspace_reuse_keeps_results_stable() {
        let mut pathfinder = Pathfinder::new();
        let start = CellCoord::new(0, 0);
        let goal = CellCoord::new(6, 4);
        let blocked = |cell: CellCoord| !(cell.column() == 3 && cell.row() != 4);

        let first = pathfinder.find_path(7, 5, start, goal, blocked);
        let _ = pathfinder.find_path(3, 3, CellCoord::new(2, 2), CellCoord::new(0, 0), open);
        let second = pathfinder.find_path(7, 5, start, goal, blocked);

        assert_eq!(first, second);
    }
}
