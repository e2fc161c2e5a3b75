//! Placement predicates over candidate cells.

use crate::grid::{CellCoordinate, Grid};

/// Leading candidate cells that `in_bounds` does not look at.
const UNCHECKED_PREFIX: usize = 3;

/// True if any cell is past the bottom or right edge, or lands on a non-empty cell.
/// Used as the stop test for a downward step.
pub fn is_blocked<G: Grid + ?Sized>(grid: &G, cells: &[CellCoordinate]) -> bool {
    let (rows, columns) = (grid.rows() as i64, grid.columns() as i64);
    cells.iter().any(|&at| {
        i64::from(at.row) >= rows
            || i64::from(at.column) >= columns
            || !grid.value_at(at).is_empty()
    })
}

/// Geometric bounds test for lateral moves and rotations. Only cells after the first
/// three are checked; occupancy is not consulted.
pub fn in_bounds<G: Grid + ?Sized>(grid: &G, cells: &[CellCoordinate]) -> bool {
    cells
        .iter()
        .skip(UNCHECKED_PREFIX)
        .all(|&at| grid.contains(at))
}
